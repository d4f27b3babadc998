//! Canned tables and profile files.

use snow2dbt_catalog::{RawColumn, TableMetadata, TableRef, TableSnapshot};

/// `ANALYTICS.PUBLIC.USERS`
pub fn users_table() -> TableRef {
    TableRef::new("ANALYTICS", "PUBLIC", "USERS")
}

/// `UserId NUMBER Y/N/N` and `Email-Addr VARCHAR N/Y/Y`.
pub fn users_columns() -> Vec<RawColumn> {
    vec![
        RawColumn::from_markers("UserId", "NUMBER", "Y", "N", "N"),
        RawColumn::from_markers("Email-Addr", "VARCHAR", "N", "Y", "Y"),
    ]
}

pub fn users_snapshot() -> TableSnapshot {
    TableSnapshot {
        table: users_table(),
        metadata: TableMetadata::new("ANALYTICS", "PUBLIC", "USERS"),
        columns: users_columns(),
    }
}

/// A wider table with mixed markers, including ones the catalog should never send.
pub fn orders_snapshot() -> TableSnapshot {
    let mut metadata = TableMetadata::new("SALES", "CORE", "ORDERS");
    metadata.comment = Some("One row per order".to_string());
    metadata.row_count = Some(1_204);
    TableSnapshot {
        table: TableRef::new("SALES", "CORE", "ORDERS"),
        metadata,
        columns: vec![
            RawColumn::from_markers("OrderID", "NUMBER(38,0)", "Y", "N", "N"),
            RawColumn::from_markers("customerRef", "VARCHAR(36)", "N", "N", "N"),
            RawColumn::from_markers("HTTPReferer", "VARCHAR", "N", "Y", "N"),
            RawColumn::from_markers("placed-at", "TIMESTAMP_NTZ(9)", "n", "y", "maybe"),
        ],
    }
}

/// Three profiles plus the dbt `config` block, in file order `alpha`, `beta`, `gamma`.
pub const PROFILES_YML: &str = "\
config:
  send_anonymous_usage_stats: false
alpha:
  target: dev
  outputs:
    dev:
      type: snowflake
      account: acme-alpha
      user: ALICE
      password: alpha-secret
beta:
  target: dev
  outputs:
    dev:
      type: snowflake
      account: acme-beta
      user: BOB
      password: beta-secret
gamma:
  target: dev
  outputs:
    dev:
      type: snowflake
      account: acme-gamma
      user: CAROL
      password: gamma-secret
";

/// A profile whose `dev` output has no `user`.
pub const PROFILES_MISSING_USER_YML: &str = "\
broken:
  outputs:
    dev:
      account: acme-broken
      password: nope
";
