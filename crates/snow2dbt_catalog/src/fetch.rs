//! Metadata fetching: the two introspection calls of a reflection run.

use crate::client::CatalogClient;
use crate::error::Result;
use crate::table_ref::TableRef;
use crate::types::TableSnapshot;
use tracing::{debug, info, warn};

/// Fetch the table record and its columns.
///
/// The table lookup runs first so a missing table fails before the column
/// describe. Nothing is retried.
pub fn fetch_table_snapshot<C: CatalogClient + ?Sized>(
    client: &C,
    table: &TableRef,
) -> Result<TableSnapshot> {
    info!("Looking up table {}", table);
    let metadata = client.describe_table_metadata(table)?;
    debug!(
        table_type = ?metadata.table_type,
        row_count = ?metadata.row_count,
        "Found {}.{}.{}",
        metadata.table_catalog,
        metadata.table_schema,
        metadata.table_name
    );

    let columns = client.describe_columns(table)?;
    if columns.is_empty() {
        warn!("Table {} has no columns", table);
    } else {
        info!("Described {} column(s) of {}", columns.len(), table);
    }

    Ok(TableSnapshot {
        table: table.clone(),
        metadata,
        columns,
    })
}
