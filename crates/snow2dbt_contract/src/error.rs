//! Errors raised while rendering a contract.

use thiserror::Error;

/// Errors that can occur while rendering an artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize contract YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
