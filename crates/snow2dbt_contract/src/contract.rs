//! Contract Types
//!
//! The compiled contract is the single source both artifacts are rendered
//! from. Column order here is the catalog's DESCRIBE order.

use crate::constraints::ConstraintKind;
use snow2dbt_catalog::TableRef;

/// A column after naming normalization and constraint inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledColumn {
    /// Final, normalized column name
    pub name: String,

    /// Declared warehouse type, optionally lower-cased
    pub data_type: String,

    /// Constraints in emission order; empty when none apply
    pub constraints: Vec<ConstraintKind>,
}

impl CompiledColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<ConstraintKind>) -> Self {
        self.constraints = constraints;
        self
    }
}

/// An enforced dbt model contract for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    /// Model name, taken from the catalog's table name
    pub model_name: String,

    /// Free-text description from the run options; empty when not given
    pub description: String,

    /// The table the contract was reflected from
    pub source: TableRef,

    /// The columns, in catalog order
    pub columns: Vec<CompiledColumn>,
}

impl Contract {
    /// Column names in order, as both serializers emit them.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
