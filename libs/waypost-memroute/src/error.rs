//! Error types for the in-memory router

use thiserror::Error;

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors that can occur while navigating
#[derive(Error, Debug)]
pub enum RouterError {
    /// No route in the table matches the navigated path
    #[error("No route matches path '{0}'")]
    NoMatch(String),
}

impl RouterError {
    /// Create a no-match error for the given path
    pub fn no_match(path: impl Into<String>) -> Self {
        Self::NoMatch(path.into())
    }
}
