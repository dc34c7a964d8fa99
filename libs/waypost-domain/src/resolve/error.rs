//! Resolution errors
//!
//! Every variant is recovered locally at the dispatch boundary: failures are
//! logged and replaced with the binding's empty value, and never reach
//! collaborators. The taxonomy exists for logging and for resolver authors.

use thiserror::Error;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that can occur while resolving route metadata
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Absent or malformed declared configuration on a segment
    #[error("Configuration error: {0}")]
    Config(String),

    /// A segment declared a resolver id that is not registered
    #[error("No resolver registered for id '{0}'")]
    UnknownResolver(String),

    /// A default or dynamic resolver failed while producing a value
    #[error("Resolver failed: {0}")]
    Resolver(String),

    /// The title formatting step failed
    #[error("Title formatting failed: {0}")]
    Format(String),
}

impl ResolveError {
    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unknown-resolver error for the given id
    pub fn unknown_resolver(id: impl Into<String>) -> Self {
        Self::UnknownResolver(id.into())
    }

    /// Create a resolver failure with a message
    pub fn resolver(msg: impl Into<String>) -> Self {
        Self::Resolver(msg.into())
    }

    /// Create a formatting failure with a message
    pub fn format_failure(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
