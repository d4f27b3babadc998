//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use snow2dbt::identity::IdentityError;
use snow2dbt::{ArtifactError, OutputError, Snow2DbtError};
use snow2dbt_catalog::CatalogError;
use std::fmt;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    /// Explain a failed run by category.
    pub fn from_run_error(err: &Snow2DbtError) -> Self {
        let base = Self::new(err.to_string());
        match err {
            Snow2DbtError::InvalidTableReference(_) => base
                .with_context("The target must name exactly one table")
                .with_suggestions([
                    "TRY: Pass the full table id: --target <database>.<schema>.<table>",
                    "TRY: Example: snow2dbt reverse --target ANALYTICS.PUBLIC.USERS",
                ]),
            Snow2DbtError::InvalidAuthConfiguration(_) => base
                .with_context("Credentials could not be gathered for this run")
                .with_suggestions([
                    "TRY: Use your dbt profiles: --auth_mode profile",
                    "TRY: For standard auth pass --account and --username (or SNOWFLAKE_ACCOUNT / SNOWFLAKE_USER)",
                ]),
            Snow2DbtError::ProfileResolutionFailure(inner) => {
                let base = base.with_context("Reading dbt profiles");
                match inner {
                    IdentityError::InvalidCacheIndex { .. } => base.with_suggestions([
                        "TRY: List profiles: snow2dbt profile --list",
                        "TRY: Reset the default profile: snow2dbt profile --clear",
                    ]),
                    IdentityError::ProfileStoreUnavailable { .. } => base.with_suggestions([
                        "TRY: Point at your dbt profiles directory: --profiles-dir DIR (or DBT_PROFILES_DIR)",
                        "TRY: Skip profiles: --auth_mode standard --account A --username U",
                    ]),
                    _ => base.with_suggestion("TRY: List profiles: snow2dbt profile --list"),
                }
            }
            Snow2DbtError::CatalogAccessFailure(inner) => {
                let base = base.with_context("Talking to Snowflake");
                match inner {
                    CatalogError::AuthRejected { .. } => base.with_suggestions([
                        "TRY: Check the account identifier, user and password in the selected profile",
                        "TRY: Switch profile: snow2dbt profile --select N",
                    ]),
                    CatalogError::ObjectNotFound(_) => base.with_suggestions([
                        "TRY: Check the spelling and case of the database, schema and table",
                        "TRY: Check that your role can see the table: --role ROLE",
                    ]),
                    CatalogError::Transport(_) => base.with_suggestions([
                        "TRY: Check network access to <account>.snowflakecomputing.com",
                        "TRY: Override the endpoint with SNOW2DBT_SNOWFLAKE_URL",
                    ]),
                    CatalogError::Protocol(_) => {
                        base.with_suggestion("TRY: Re-run with -v and inspect the log file")
                    }
                }
            }
            Snow2DbtError::SerializationFailure(OutputError::Write(ArtifactError::UnsafeName(_))) => {
                base.with_context("Schema and table names become the output directory and file names")
                    .with_suggestion("TRY: Reverse the table through a view with a plain name")
            }
            Snow2DbtError::SerializationFailure(_) => base
                .with_context("Writing the YAML and SQL files")
                .with_suggestion("TRY: Check that the output directory is writable: --output DIR"),
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Wrap any run error for return from a command.
pub fn explain(err: impl Into<Snow2DbtError>) -> anyhow::Error {
    HelpfulError::from_run_error(&err.into()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While processing data")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While processing data"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_bad_cache_suggests_clear() {
        let err = Snow2DbtError::from(IdentityError::InvalidCacheIndex {
            value: "9".to_string(),
            reason: "expected a number between 1 and 2".to_string(),
        });
        let helpful = HelpfulError::from_run_error(&err);
        assert!(helpful
            .suggestions
            .iter()
            .any(|s| s.contains("snow2dbt profile --clear")));
    }

    #[test]
    fn test_missing_table_suggests_role() {
        let err = Snow2DbtError::from(CatalogError::not_found("ANALYTICS.PUBLIC.GHOST"));
        let display = HelpfulError::from_run_error(&err).to_string();
        assert!(display.starts_with("ERROR: Catalog access failed: Object not found"));
        assert!(display.contains("--role"));
    }
}
