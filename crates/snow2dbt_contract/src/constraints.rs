//! Constraint inference from catalog column flags.

use serde::Serialize;
use snow2dbt_catalog::{CatalogFlag, RawColumn};
use std::fmt;
use tracing::warn;

/// dbt contract constraint kinds, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    NotNull,
    Unique,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::PrimaryKey => "primary_key",
            ConstraintKind::NotNull => "not_null",
            ConstraintKind::Unique => "unique",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a column's flags to its constraints.
///
/// Each check is independent; the result is always ordered
/// primary_key, not_null, unique. Unrecognized markers contribute nothing.
pub fn infer_constraints(column: &RawColumn) -> Vec<ConstraintKind> {
    for (flag, label) in [
        (&column.primary_key, "primary key"),
        (&column.nullable, "null?"),
        (&column.unique_key, "unique key"),
    ] {
        if let CatalogFlag::Unrecognized(raw) = flag {
            warn!(
                column = %column.name,
                "Unrecognized '{}' marker {:?}; no constraint inferred from it",
                label,
                raw
            );
        }
    }

    let mut constraints = Vec::with_capacity(3);
    if column.primary_key.is_yes() {
        constraints.push(ConstraintKind::PrimaryKey);
    }
    if column.nullable.is_no() {
        constraints.push(ConstraintKind::NotNull);
    }
    if column.unique_key.is_yes() {
        constraints.push(ConstraintKind::Unique);
    }
    constraints
}
