//! Fully-qualified table references.
//!
//! A reference is typed once on the command line as `<database>.<schema>.<table>`
//! and validated before any connection is opened. The catalog client is the only
//! place these parts are turned into SQL identifiers.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a table reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableRefError {
    #[error("Invalid table reference '{input}': expected <database>.<schema>.<table>, found {parts} part(s)")]
    WrongPartCount { input: String, parts: usize },

    #[error("Invalid table reference '{input}': the {position} part is empty")]
    EmptyPart {
        input: String,
        position: &'static str,
    },
}

/// A `<database>.<schema>.<table>` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub database: String,
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Parse a dotted three-part identifier.
    pub fn parse(input: &str) -> Result<Self, TableRefError> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(TableRefError::WrongPartCount {
                input: input.to_string(),
                parts: parts.len(),
            });
        }

        for (part, position) in parts.iter().zip(["database", "schema", "table"]) {
            if part.trim().is_empty() {
                return Err(TableRefError::EmptyPart {
                    input: input.to_string(),
                    position,
                });
            }
        }

        Ok(Self::new(parts[0].trim(), parts[1].trim(), parts[2].trim()))
    }

    /// SQL text for this reference, each part rendered with [`sql_identifier`].
    pub fn qualified_sql(&self) -> String {
        format!(
            "{}.{}.{}",
            sql_identifier(&self.database),
            sql_identifier(&self.schema),
            sql_identifier(&self.table)
        )
    }
}

impl FromStr for TableRef {
    type Err = TableRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.table)
    }
}

/// True when `name` can be written without quotes in Snowflake SQL.
pub fn is_unquoted_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render an identifier for SQL text.
///
/// Plain identifiers are emitted bare so Snowflake resolves them the usual
/// (case-insensitive) way. Anything else is double-quoted with embedded quotes
/// doubled.
pub fn sql_identifier(name: &str) -> String {
    if is_unquoted_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// The name Snowflake stores for an identifier typed as `name`.
///
/// Unquoted identifiers are upper-cased by the warehouse, so filters against
/// `INFORMATION_SCHEMA` must compare against the upper-cased form.
pub fn resolved_identifier(name: &str) -> String {
    if is_unquoted_identifier(name) {
        name.to_ascii_uppercase()
    } else {
        name.to_string()
    }
}
