//! Compiler and both serializers driven from catalog fixtures.

use snow2dbt_contract::{
    render_contract_yaml, render_projection, CommaStyle, CompileOptions, ConstraintKind,
    ContractCompiler, NamingOptions,
};
use snow2dbt_test_utils::fixtures;

fn snake_lower_types() -> ContractCompiler {
    ContractCompiler::new(CompileOptions {
        naming: NamingOptions::default().snake(true),
        lower_types: true,
        description: None,
    })
}

/// Column names between `SELECT` and `FROM`, in order.
fn projected_names(sql: &str) -> Vec<String> {
    let body = sql
        .strip_prefix("SELECT")
        .and_then(|rest| rest.split("\nFROM ").next())
        .unwrap();
    body.split(',')
        .map(|name| name.trim().to_string())
        .collect()
}

fn yaml_names(yaml: &str) -> Vec<String> {
    let doc: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    doc["models"][0]["columns"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|column| column["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_users_table_end_to_end() {
    let contract = snake_lower_types()
        .compile(&fixtures::users_snapshot());

    assert_eq!(contract.columns.len(), 2);
    assert_eq!(contract.columns[0].name, "user_id");
    assert_eq!(contract.columns[0].data_type, "number");
    assert_eq!(
        contract.columns[0].constraints,
        vec![ConstraintKind::PrimaryKey, ConstraintKind::NotNull]
    );
    assert_eq!(contract.columns[1].name, "email_addr");
    assert_eq!(contract.columns[1].data_type, "varchar");
    assert_eq!(contract.columns[1].constraints, vec![ConstraintKind::Unique]);

    let sql = render_projection(&contract, CommaStyle::Trailing);
    assert!(sql.contains("user_id,\n\temail_addr"));
    assert!(sql.contains("FROM {{ ref('ANALYTICS.PUBLIC.USERS') }}"));

    let yaml = render_contract_yaml(&contract).unwrap();
    let expected = "\
models:
- name: USERS
  description: ''
  config:
    contract:
      enforced: true
  columns:
  - name: user_id
    data_type: number
    constraints:
    - type: primary_key
    - type: not_null
  - name: email_addr
    data_type: varchar
    constraints:
    - type: unique
";
    assert_eq!(yaml, expected);
}

#[test]
fn test_sql_and_yaml_agree_on_columns() {
    let snapshot = fixtures::orders_snapshot();
    let compilers = [
        ContractCompiler::default(),
        snake_lower_types(),
        ContractCompiler::new(CompileOptions {
            naming: NamingOptions::default()
                .with_prefix("src_")
                .with_suffix("_v1")
                .lower(true),
            ..CompileOptions::default()
        }),
    ];

    for compiler in &compilers {
        let contract = compiler.compile(&snapshot);
        let yaml = render_contract_yaml(&contract).unwrap();
        for comma in [CommaStyle::Trailing, CommaStyle::Leading] {
            let sql = render_projection(&contract, comma);
            assert_eq!(projected_names(&sql), yaml_names(&yaml));
        }
    }
}

#[test]
fn test_orders_snake_names_and_lenient_markers() {
    let contract = snake_lower_types()
        .compile(&fixtures::orders_snapshot());

    let names: Vec<&str> = contract.column_names().collect();
    assert_eq!(
        names,
        vec!["order_id", "customer_ref", "http_referer", "placed_at"]
    );
    // Lower-case markers are still read; "maybe" adds nothing.
    assert!(contract.columns[3].constraints.is_empty());
    assert_eq!(contract.columns[1].constraints, vec![ConstraintKind::NotNull]);
}

#[test]
fn test_rendering_is_deterministic() {
    let compiler = snake_lower_types();
    let first = compiler.compile(&fixtures::orders_snapshot());
    let second = compiler.compile(&fixtures::orders_snapshot());
    assert_eq!(first, second);

    assert_eq!(
        render_contract_yaml(&first).unwrap(),
        render_contract_yaml(&first).unwrap()
    );
    assert_eq!(
        render_projection(&first, CommaStyle::Leading),
        render_projection(&first, CommaStyle::Leading)
    );
}
