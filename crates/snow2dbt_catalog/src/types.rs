//! Typed rows returned by the catalog, and the identity used to reach it.

use crate::table_ref::TableRef;
use std::fmt;

/// A categorical yes/no marker as reported by `DESCRIBE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogFlag {
    Yes,
    No,
    /// Anything other than `Y`/`N`, kept verbatim for diagnostics.
    Unrecognized(String),
}

impl CatalogFlag {
    /// Interpret a raw marker. Comparison ignores surrounding whitespace and case.
    pub fn from_marker(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "Y" => CatalogFlag::Yes,
            "N" => CatalogFlag::No,
            _ => CatalogFlag::Unrecognized(raw.to_string()),
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, CatalogFlag::Yes)
    }

    pub fn is_no(&self) -> bool {
        matches!(self, CatalogFlag::No)
    }
}

/// One row of `DESCRIBE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub declared_type: String,
    pub primary_key: CatalogFlag,
    pub nullable: CatalogFlag,
    pub unique_key: CatalogFlag,
}

impl RawColumn {
    /// Build a column from the raw markers the catalog returns.
    pub fn from_markers(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        primary_key: &str,
        nullable: &str,
        unique_key: &str,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            primary_key: CatalogFlag::from_marker(primary_key),
            nullable: CatalogFlag::from_marker(nullable),
            unique_key: CatalogFlag::from_marker(unique_key),
        }
    }
}

/// Table-level row from `INFORMATION_SCHEMA.TABLES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    pub table_catalog: String,
    pub table_schema: String,
    pub table_name: String,
    pub table_type: Option<String>,
    pub comment: Option<String>,
    pub row_count: Option<u64>,
}

impl TableMetadata {
    /// Minimal metadata for a base table.
    pub fn new(
        table_catalog: impl Into<String>,
        table_schema: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            table_catalog: table_catalog.into(),
            table_schema: table_schema.into(),
            table_name: table_name.into(),
            table_type: Some("BASE TABLE".to_string()),
            comment: None,
            row_count: None,
        }
    }
}

/// Everything fetched about one table in a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub table: TableRef,
    pub metadata: TableMetadata,
    /// Columns in the order the catalog described them.
    pub columns: Vec<RawColumn>,
}

/// A credential that must never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// The credential actually used to open a catalog session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account: String,
    pub username: String,
    pub secret: Secret,
}

impl SessionIdentity {
    pub fn new(account: impl Into<String>, username: impl Into<String>, secret: Secret) -> Self {
        Self {
            account: account.into(),
            username: username.into(),
            secret,
        }
    }
}
