//! Error types for catalog access.

use thiserror::Error;

/// Catalog operation result type.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog errors. Every variant is fatal for a reflection run.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Credentials were refused by the warehouse
    #[error("Authentication rejected for {account}: {message}")]
    AuthRejected { account: String, message: String },

    /// The table (or its database/schema) does not exist or is not visible
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Network or HTTP level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The warehouse answered with something we cannot decode
    #[error("Unexpected catalog response: {0}")]
    Protocol(String),
}

impl CatalogError {
    /// Create an object-not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::ObjectNotFound(msg.into())
    }

    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Protocol(err.to_string())
    }
}
