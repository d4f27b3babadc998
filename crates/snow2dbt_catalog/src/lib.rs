//! Warehouse catalog access for snow2dbt.
//!
//! # Modules
//!
//! - [`table_ref`]: `<database>.<schema>.<table>` parsing and identifier quoting
//! - [`types`]: typed catalog rows and the session identity
//! - [`client`]: the [`CatalogClient`] seam the compiler depends on
//! - [`fetch`]: the two introspection calls of a run
//! - [`snowflake`]: HTTP implementation of [`CatalogClient`]

pub mod client;
pub mod error;
pub mod fetch;
pub mod snowflake;
pub mod table_ref;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use fetch::fetch_table_snapshot;
pub use snowflake::{SnowflakeClient, SnowflakeConfig};
pub use table_ref::{TableRef, TableRefError};
pub use types::{CatalogFlag, RawColumn, Secret, SessionIdentity, TableMetadata, TableSnapshot};
