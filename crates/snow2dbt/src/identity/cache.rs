//! Persisted default profile index.

use super::error::IdentityError;
use std::cell::Cell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the cache, relative to the working directory.
pub const PROFILE_CACHE_FILE: &str = ".snow2dbt_profile";

/// A single persisted 1-based profile index.
pub trait ProfileCache {
    fn get(&self) -> Result<Option<usize>, IdentityError>;
    fn set(&self, index: usize) -> Result<(), IdentityError>;
    fn clear(&self) -> Result<(), IdentityError>;
}

/// Decimal index in a plain text file.
#[derive(Debug, Clone)]
pub struct FileProfileCache {
    path: PathBuf,
}

impl FileProfileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> IdentityError {
        IdentityError::Cache {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProfileCache for FileProfileCache {
    fn get(&self) -> Result<Option<usize>, IdentityError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let value = contents.trim();
        value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| IdentityError::InvalidCacheIndex {
                value: value.to_string(),
                reason: format!(
                    "{} does not hold a profile number; run `snow2dbt profile --clear`",
                    self.path.display()
                ),
            })
    }

    fn set(&self, index: usize) -> Result<(), IdentityError> {
        std::fs::write(&self.path, index.to_string()).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), IdentityError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process cache for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryProfileCache {
    index: Cell<Option<usize>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(index: usize) -> Self {
        Self {
            index: Cell::new(Some(index)),
        }
    }
}

impl ProfileCache for MemoryProfileCache {
    fn get(&self) -> Result<Option<usize>, IdentityError> {
        Ok(self.index.get())
    }

    fn set(&self, index: usize) -> Result<(), IdentityError> {
        self.index.set(Some(index));
        Ok(())
    }

    fn clear(&self) -> Result<(), IdentityError> {
        self.index.set(None);
        Ok(())
    }
}
