//! Metadata fetcher behaviour against a scripted catalog.

use snow2dbt_catalog::{
    error::Result, fetch_table_snapshot, CatalogClient, CatalogError, RawColumn, TableMetadata,
    TableRef,
};
use std::cell::RefCell;

/// Catalog that records which calls were made.
struct ScriptedCatalog {
    metadata: Option<TableMetadata>,
    columns: Vec<RawColumn>,
    calls: RefCell<Vec<&'static str>>,
}

impl ScriptedCatalog {
    fn new(metadata: Option<TableMetadata>, columns: Vec<RawColumn>) -> Self {
        Self {
            metadata,
            columns,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl CatalogClient for ScriptedCatalog {
    fn describe_table_metadata(&self, table: &TableRef) -> Result<TableMetadata> {
        self.calls.borrow_mut().push("metadata");
        self.metadata
            .clone()
            .ok_or_else(|| CatalogError::not_found(table.to_string()))
    }

    fn describe_columns(&self, _table: &TableRef) -> Result<Vec<RawColumn>> {
        self.calls.borrow_mut().push("columns");
        Ok(self.columns.clone())
    }
}

#[test]
fn test_fetch_returns_columns_in_catalog_order() {
    let catalog = ScriptedCatalog::new(
        Some(TableMetadata::new("ANALYTICS", "PUBLIC", "USERS")),
        vec![
            RawColumn::from_markers("ZETA", "NUMBER", "N", "Y", "N"),
            RawColumn::from_markers("ALPHA", "VARCHAR", "N", "Y", "N"),
            RawColumn::from_markers("MID", "DATE", "N", "Y", "N"),
        ],
    );
    let table = TableRef::parse("ANALYTICS.PUBLIC.USERS").unwrap();

    let snapshot = fetch_table_snapshot(&catalog, &table).unwrap();

    let names: Vec<&str> = snapshot.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ZETA", "ALPHA", "MID"]);
    assert_eq!(snapshot.metadata.table_name, "USERS");
    assert_eq!(snapshot.table, table);
    assert_eq!(*catalog.calls.borrow(), vec!["metadata", "columns"]);
}

#[test]
fn test_missing_table_stops_before_describe() {
    let catalog = ScriptedCatalog::new(None, Vec::new());
    let table = TableRef::parse("ANALYTICS.PUBLIC.GHOST").unwrap();

    let err = fetch_table_snapshot(&catalog, &table).unwrap_err();

    assert!(matches!(err, CatalogError::ObjectNotFound(_)));
    assert_eq!(*catalog.calls.borrow(), vec!["metadata"]);
}

#[test]
fn test_fetch_through_trait_object() {
    let catalog: Box<dyn CatalogClient> = Box::new(ScriptedCatalog::new(
        Some(TableMetadata::new("RAW", "EVENTS", "CLICKS")),
        vec![RawColumn::from_markers("ID", "NUMBER", "Y", "N", "N")],
    ));
    let table = TableRef::new("RAW", "EVENTS", "CLICKS");

    let snapshot = fetch_table_snapshot(catalog.as_ref(), &table).unwrap();
    assert_eq!(snapshot.columns.len(), 1);
}
