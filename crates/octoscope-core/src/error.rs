//! Unified error types for octoscope

use thiserror::Error;

/// Unified error type for all octoscope operations
#[derive(Error, Debug)]
pub enum OctoscopeError {
    // Remote API errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("HTTP error {status}")]
    Http { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Dashboard errors
    #[error("Dashboard error: {0}")]
    Dashboard(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl OctoscopeError {
    /// Map a non-success HTTP status onto the error taxonomy.
    ///
    /// `resource` is the path that was requested; it is kept for `NotFound`.
    pub fn from_status(status: u16, resource: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound(resource.into()),
            403 => Self::RateLimited,
            status => Self::Http { status },
        }
    }
}

/// Result type alias using OctoscopeError
pub type Result<T> = std::result::Result<T, OctoscopeError>;
