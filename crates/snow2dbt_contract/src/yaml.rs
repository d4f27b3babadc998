//! dbt model contract YAML.
//!
//! Rendered from ordered structs so field order is fixed:
//! `name, description, config, columns` per model and
//! `name, data_type, constraints` per column.

use crate::constraints::ConstraintKind;
use crate::contract::{CompiledColumn, Contract};
use crate::error::RenderError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SchemaFile<'a> {
    models: Vec<ModelEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ModelEntry<'a> {
    name: &'a str,
    description: &'a str,
    config: ModelConfig,
    columns: Vec<ColumnEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ModelConfig {
    contract: ContractConfig,
}

#[derive(Debug, Serialize)]
struct ContractConfig {
    enforced: bool,
}

#[derive(Debug, Serialize)]
struct ColumnEntry<'a> {
    name: &'a str,
    data_type: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    constraints: Vec<ConstraintEntry>,
}

#[derive(Debug, Serialize)]
struct ConstraintEntry {
    #[serde(rename = "type")]
    kind: ConstraintKind,
}

impl<'a> From<&'a CompiledColumn> for ColumnEntry<'a> {
    fn from(column: &'a CompiledColumn) -> Self {
        Self {
            name: &column.name,
            data_type: &column.data_type,
            constraints: column
                .constraints
                .iter()
                .map(|kind| ConstraintEntry { kind: *kind })
                .collect(),
        }
    }
}

/// Render the contract as a dbt `models:` document.
pub fn render_contract_yaml(contract: &Contract) -> Result<String, RenderError> {
    let file = SchemaFile {
        models: vec![ModelEntry {
            name: &contract.model_name,
            description: &contract.description,
            config: ModelConfig {
                contract: ContractConfig { enforced: true },
            },
            columns: contract.columns.iter().map(ColumnEntry::from).collect(),
        }],
    };
    Ok(serde_yaml::to_string(&file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snow2dbt_catalog::TableRef;

    fn contract(columns: Vec<CompiledColumn>) -> Contract {
        Contract {
            model_name: "USERS".to_string(),
            description: "Application users".to_string(),
            source: TableRef::new("ANALYTICS", "PUBLIC", "USERS"),
            columns,
        }
    }

    #[test]
    fn test_render_full_document() {
        let yaml = render_contract_yaml(&contract(vec![
            CompiledColumn::new("user_id", "number")
                .with_constraints(vec![ConstraintKind::PrimaryKey, ConstraintKind::NotNull]),
            CompiledColumn::new("nickname", "varchar"),
        ]))
        .unwrap();

        let expected = "\
models:
- name: USERS
  description: Application users
  config:
    contract:
      enforced: true
  columns:
  - name: user_id
    data_type: number
    constraints:
    - type: primary_key
    - type: not_null
  - name: nickname
    data_type: varchar
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_constraints_omitted_when_empty() {
        let yaml = render_contract_yaml(&contract(vec![CompiledColumn::new("note", "text")]))
            .unwrap();
        assert!(!yaml.contains("constraints"));
    }

    #[test]
    fn test_empty_description_still_rendered() {
        let mut contract = contract(Vec::new());
        contract.description = String::new();
        let yaml = render_contract_yaml(&contract).unwrap();

        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc["models"][0]["description"].as_str(), Some(""));
        assert_eq!(doc["models"][0]["config"]["contract"]["enforced"].as_bool(), Some(true));
    }

    #[test]
    fn test_model_fields_in_fixed_order() {
        let yaml = render_contract_yaml(&contract(vec![CompiledColumn::new("id", "number")]))
            .unwrap();
        let position = |needle: &str| yaml.find(needle).unwrap();
        assert!(position("- name: USERS") < position("  description:"));
        assert!(position("  description:") < position("  config:"));
        assert!(position("  config:") < position("  columns:"));
    }
}
