//! Shared logging utilities for the snow2dbt binary.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "snow2dbt=info,snow2dbt_catalog=info,snow2dbt_contract=info";
const VERBOSE_LOG_FILTER: &str = "snow2dbt=debug,snow2dbt_catalog=debug,snow2dbt_contract=debug";

/// Logging configuration for one invocation.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Initialize tracing with a daily rolling file writer and stderr output.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole run. `None` means the log directory was unusable and only the console
/// layer is installed.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.verbose)));

    let mut guard = None;
    let mut dir_error = None;
    let file_layer = match ensure_logs_dir() {
        Ok(log_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(log_dir, format!("{}.log", config.app_name));
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_filter(env_filter.clone()),
            )
        }
        Err(err) => {
            dir_error = Some(err);
            None
        }
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(err) = dir_error {
        tracing::warn!("File logging disabled: {:#}", err);
    }

    Ok(guard)
}

/// Get the snow2dbt home directory: ~/.snow2dbt
pub fn snow2dbt_home() -> Result<PathBuf> {
    if let Ok(override_path) = std::env::var("SNOW2DBT_HOME") {
        return Ok(PathBuf::from(override_path));
    }
    dirs::home_dir()
        .map(|home| home.join(".snow2dbt"))
        .context("Could not determine home directory (set SNOW2DBT_HOME)")
}

/// Get the logs directory: ~/.snow2dbt/logs
pub fn logs_dir() -> Result<PathBuf> {
    Ok(snow2dbt_home()?.join("logs"))
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir()?;
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_every_crate_to_debug() {
        assert!(default_filter(false).split(',').all(|d| d.ends_with("=info")));
        assert!(default_filter(true).split(',').all(|d| d.ends_with("=debug")));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(default_filter(false)).is_ok());
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }
}
