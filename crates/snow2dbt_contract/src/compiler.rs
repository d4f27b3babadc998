//! Contract compilation: catalog snapshot in, contract out.

use crate::constraints::infer_constraints;
use crate::contract::{CompiledColumn, Contract};
use crate::naming::NamingOptions;
use snow2dbt_catalog::TableSnapshot;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Options for one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub naming: NamingOptions,
    /// Lower-case declared types
    pub lower_types: bool,
    /// Model description; `None` renders as an empty string
    pub description: Option<String>,
}

/// Turns a [`TableSnapshot`] into a [`Contract`]. Performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct ContractCompiler {
    options: CompileOptions,
}

impl ContractCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Normalize and annotate every column, keeping catalog order.
    ///
    /// Every catalog column is emitted. Names that normalize to nothing or
    /// collide with an earlier column are kept as they are and logged.
    pub fn compile(&self, snapshot: &TableSnapshot) -> Contract {
        let mut columns = Vec::with_capacity(snapshot.columns.len());
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(snapshot.columns.len());

        for raw in &snapshot.columns {
            let name = self.options.naming.normalize(&raw.name);
            if name.is_empty() {
                warn!("Column '{}' normalizes to an empty name", raw.name);
            } else if let Some(first) = seen.insert(name.clone(), raw.name.as_str()) {
                warn!(
                    "Columns '{}' and '{}' both normalize to '{}'",
                    first, raw.name, name
                );
            }

            let data_type = if self.options.lower_types {
                raw.declared_type.to_lowercase()
            } else {
                raw.declared_type.clone()
            };
            let constraints = infer_constraints(raw);
            debug!(
                "Column {} -> {} ({}) constraints={:?}",
                raw.name, name, data_type, constraints
            );

            columns.push(CompiledColumn {
                name,
                data_type,
                constraints,
            });
        }

        Contract {
            model_name: snapshot.metadata.table_name.clone(),
            description: self.options.description.clone().unwrap_or_default(),
            source: snapshot.table.clone(),
            columns,
        }
    }
}
