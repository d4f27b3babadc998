use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while picking credentials.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Unknown auth mode '{0}' (expected profile, dbt or standard)")]
    UnknownAuthMode(String),

    #[error("Missing {0}: standard auth needs both --account and --username")]
    MissingCredential(&'static str),

    #[error("dbt profiles file unavailable at {}: {reason}", .path.display())]
    ProfileStoreUnavailable { path: PathBuf, reason: String },

    #[error("Profile '{name}' not found (available: {})", .available.join(", "))]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("Default profile '{value}' is invalid: {reason}")]
    InvalidCacheIndex { value: String, reason: String },

    #[error("Profile '{profile}' has no outputs.dev.{field}")]
    MalformedProfile { profile: String, field: &'static str },

    #[error("Profile cache error at {}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read password: {0}")]
    SecretPrompt(#[source] std::io::Error),
}

impl IdentityError {
    /// Configuration mistakes as opposed to problems with the stored profiles.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            IdentityError::UnknownAuthMode(_)
                | IdentityError::MissingCredential(_)
                | IdentityError::SecretPrompt(_)
        )
    }
}
