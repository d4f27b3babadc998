//! Error taxonomy for a reverse run.
//!
//! Component crates keep their own error enums; they fold into
//! [`Snow2DbtError`] here so the CLI can pick a message and suggestions per
//! category.

use crate::artifacts::ArtifactError;
use crate::identity::IdentityError;
use snow2dbt_catalog::{CatalogError, TableRefError};
use snow2dbt_contract::RenderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Snow2DbtError>;

#[derive(Error, Debug)]
pub enum Snow2DbtError {
    #[error("Invalid table reference: {0}")]
    InvalidTableReference(#[from] TableRefError),

    /// Unknown auth mode or missing standard-mode credential
    #[error("Invalid auth configuration: {0}")]
    InvalidAuthConfiguration(#[source] IdentityError),

    /// Profile store, cache or profile content problem
    #[error("Profile resolution failed: {0}")]
    ProfileResolutionFailure(#[source] IdentityError),

    #[error("Catalog access failed: {0}")]
    CatalogAccessFailure(#[from] CatalogError),

    #[error("Output failed: {0}")]
    SerializationFailure(#[from] OutputError),
}

/// Rendering or writing an artifact.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Write(#[from] ArtifactError),
}

impl From<IdentityError> for Snow2DbtError {
    fn from(err: IdentityError) -> Self {
        if err.is_configuration() {
            Snow2DbtError::InvalidAuthConfiguration(err)
        } else {
            Snow2DbtError::ProfileResolutionFailure(err)
        }
    }
}

impl From<RenderError> for Snow2DbtError {
    fn from(err: RenderError) -> Self {
        Snow2DbtError::SerializationFailure(err.into())
    }
}

impl From<ArtifactError> for Snow2DbtError {
    fn from(err: ArtifactError) -> Self {
        Snow2DbtError::SerializationFailure(err.into())
    }
}
