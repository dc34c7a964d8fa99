//! Declared route configuration
//!
//! What a route definition may declare under a binding's field name: either a
//! static value, decoded directly into the binding's value type, or a
//! reference to a dynamic resolver registered with the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registry key identifying a dynamic resolver
///
/// ResolverId is a typed wrapper around the registry key to prevent mixing
/// resolver references up with other strings in route data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolverId(pub String);

impl ResolverId {
    /// Create a new ResolverId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResolverId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResolverId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Declared configuration for one binding on one segment
///
/// Explicitly one of two shapes, matched by tag at dispatch time: a plain
/// value used as-is, or a reference resolved through the pipeline's registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteData {
    /// A static value, decoded into the binding's value type
    Static(serde_json::Value),
    /// A reference to a registered dynamic resolver
    Resolver(ResolverId),
}

impl RouteData {
    /// Declare a static value
    ///
    /// Values that fail to serialize are declared as null and will decode to
    /// the binding's empty value at dispatch time.
    pub fn value(value: impl Serialize) -> Self {
        Self::Static(serde_json::to_value(value).unwrap_or(serde_json::Value::Null))
    }

    /// Declare a dynamic resolver reference
    pub fn resolver(id: impl Into<ResolverId>) -> Self {
        Self::Resolver(id.into())
    }
}
