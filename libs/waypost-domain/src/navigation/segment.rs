//! Route segment model
//!
//! A RouteSegment is one node of the active navigation chain, corresponding to
//! one level of nested routing. Segments are owned by the navigation source
//! and recreated on every navigation; the pipeline only ever reads them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::resolve::RouteData;

/// Which parameter map of a segment a lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// Parameters captured from the matched path (e.g. `:order_id`)
    Path,
    /// Parameters parsed from the query string
    Query,
}

/// One node in the active navigation chain
///
/// A segment carries:
/// - the ordered path tokens from the root down to this node
/// - the path parameters captured while matching those tokens
/// - the query parameters of the current navigation
/// - the optional declared configuration map, keyed by binding field name,
///   where each entry is either a static value or a resolver reference
///
/// Segments are immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSegment {
    /// Path tokens from the root to this node (empty for the root segment)
    path_tokens: Vec<String>,

    /// Captured path parameters (`:name` -> value)
    path_params: HashMap<String, String>,

    /// Query parameters of the current navigation
    query_params: HashMap<String, String>,

    /// Declared per-segment configuration, keyed by binding field name
    data: HashMap<String, RouteData>,
}

impl RouteSegment {
    /// Create a segment with the given path tokens and no parameters or data
    pub fn new(path_tokens: Vec<String>) -> Self {
        Self {
            path_tokens,
            path_params: HashMap::new(),
            query_params: HashMap::new(),
            data: HashMap::new(),
        }
    }

    /// Create the root segment (no path tokens)
    pub fn root() -> Self {
        Self::new(Vec::new())
    }

    /// Add a captured path parameter
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Replace the whole query parameter map
    pub fn with_query_params(mut self, params: HashMap<String, String>) -> Self {
        self.query_params = params;
        self
    }

    /// Declare configuration under the given binding field name
    pub fn with_data(mut self, field: impl Into<String>, data: RouteData) -> Self {
        self.data.insert(field.into(), data);
        self
    }

    /// Path tokens from the root to this node
    pub fn path_tokens(&self) -> &[String] {
        &self.path_tokens
    }

    /// Look up a parameter of the given kind on this segment only
    pub fn param(&self, name: &str, kind: ParamKind) -> Option<&str> {
        let map = match kind {
            ParamKind::Path => &self.path_params,
            ParamKind::Query => &self.query_params,
        };
        map.get(name).map(String::as_str)
    }

    /// Declared configuration under the given binding field name, if any
    pub fn data(&self, field: &str) -> Option<&RouteData> {
        self.data.get(field)
    }

    /// Render the complete path from the root to this segment
    ///
    /// The root segment renders as `/`.
    pub fn full_path(&self) -> String {
        if self.path_tokens.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for token in &self.path_tokens {
            path.push('/');
            path.push_str(token);
        }
        path
    }
}
