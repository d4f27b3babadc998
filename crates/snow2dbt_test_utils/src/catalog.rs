//! In-memory [`CatalogClient`].

use snow2dbt_catalog::{
    error::Result, CatalogClient, CatalogError, RawColumn, TableMetadata, TableRef, TableSnapshot,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves fixed snapshots and records every call it receives.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    tables: HashMap<TableRef, TableSnapshot>,
    unreachable: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. Lookups use the snapshot's `table` as typed.
    pub fn with_table(mut self, snapshot: TableSnapshot) -> Self {
        self.tables.insert(snapshot.table.clone(), snapshot);
        self
    }

    /// Every call fails with a transport error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            unreachable: Some(message.into()),
            ..Self::default()
        }
    }

    /// Calls made so far, as `"metadata <table>"` / `"columns <table>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn lookup(&self, kind: &str, table: &TableRef) -> Result<&TableSnapshot> {
        self.calls.borrow_mut().push(format!("{} {}", kind, table));
        if let Some(message) = &self.unreachable {
            return Err(CatalogError::transport(message.clone()));
        }
        self.tables
            .get(table)
            .ok_or_else(|| CatalogError::not_found(format!("Table '{}' does not exist", table)))
    }
}

impl CatalogClient for StaticCatalog {
    fn describe_table_metadata(&self, table: &TableRef) -> Result<TableMetadata> {
        Ok(self.lookup("metadata", table)?.metadata.clone())
    }

    fn describe_columns(&self, table: &TableRef) -> Result<Vec<RawColumn>> {
        Ok(self.lookup("columns", table)?.columns.clone())
    }
}
