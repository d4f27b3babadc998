//! The catalog surface the compiler consumes.

use crate::error::Result;
use crate::table_ref::TableRef;
use crate::types::{RawColumn, TableMetadata};

/// Read-only schema introspection against an authenticated session.
///
/// Implementations receive validated identifier parts and own all quoting and
/// parameter binding. Callers never build SQL text.
pub trait CatalogClient {
    /// Look up the table-level record. Missing tables are `ObjectNotFound`.
    fn describe_table_metadata(&self, table: &TableRef) -> Result<TableMetadata>;

    /// Describe the table's columns in catalog order.
    fn describe_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>>;
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn describe_table_metadata(&self, table: &TableRef) -> Result<TableMetadata> {
        (**self).describe_table_metadata(table)
    }

    fn describe_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>> {
        (**self).describe_columns(table)
    }
}

impl<C: CatalogClient + ?Sized> CatalogClient for Box<C> {
    fn describe_table_metadata(&self, table: &TableRef) -> Result<TableMetadata> {
        (**self).describe_table_metadata(table)
    }

    fn describe_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>> {
        (**self).describe_columns(table)
    }
}
