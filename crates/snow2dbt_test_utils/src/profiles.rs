//! Throwaway dbt profiles directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `profiles.yml`. Removed on drop.
pub struct TempProfilesDir {
    dir: TempDir,
}

impl TempProfilesDir {
    pub fn with_contents(contents: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("profiles.yml"), contents)?;
        Ok(Self { dir })
    }

    /// An empty directory: no `profiles.yml` at all.
    pub fn empty() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.dir.path().join("profiles.yml")
    }
}
