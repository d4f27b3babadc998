//! Path resolution for the CLI.
//!
//! The dbt profiles directory comes from `--profiles-dir` / `DBT_PROFILES_DIR`
//! (clap fills both into the same argument) and otherwise `~/.dbt`.

use anyhow::{Context, Result};
use snow2dbt::identity::PROFILE_CACHE_FILE;
use std::path::{Path, PathBuf};

pub const PROFILES_FILE: &str = "profiles.yml";

/// `<dir>/profiles.yml`, defaulting `<dir>` to `~/.dbt`.
pub fn dbt_profiles_path(profiles_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = profiles_dir {
        return Ok(dir.join(PROFILES_FILE));
    }
    dirs::home_dir()
        .map(|home| home.join(".dbt").join(PROFILES_FILE))
        .context("Could not determine home directory. Set DBT_PROFILES_DIR or pass --profiles-dir.")
}

/// Default-profile cache, relative to the working directory.
pub fn profile_cache_path() -> PathBuf {
    PathBuf::from(PROFILE_CACHE_FILE)
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("target/snow2dbt")
}
