//! Writes the YAML and SQL artifacts for one contract.

use snow2dbt_catalog::TableRef;
use snow2dbt_contract::Contract;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("'{0}' cannot be used as a file name")]
    UnsafeName(String),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Paths of one written pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub directory: PathBuf,
    pub yaml_path: PathBuf,
    pub sql_path: PathBuf,
}

/// Lays artifacts out as `<output>/<schema>/<table>.{yaml,sql}`.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write YAML first, then SQL. Existing files are truncated.
    pub fn write(
        &self,
        contract: &Contract,
        yaml: &str,
        sql: &str,
    ) -> Result<WrittenArtifacts, ArtifactError> {
        let (schema, table) = output_names(&contract.source)?;

        let directory = self.output_dir.join(schema);
        fs::create_dir_all(&directory).map_err(|source| ArtifactError::CreateDir {
            path: directory.clone(),
            source,
        })?;

        let yaml_path = directory.join(format!("{}.yaml", table));
        let sql_path = directory.join(format!("{}.sql", table));
        write_file(&yaml_path, yaml)?;
        write_file(&sql_path, sql)?;

        info!("YAML and SQL files written at path: {}", directory.display());
        Ok(WrittenArtifacts {
            directory,
            yaml_path,
            sql_path,
        })
    }
}

/// Schema and table as directory and file names; rejects anything that would
/// leave the output directory.
pub fn output_names(table: &TableRef) -> Result<(&str, &str), ArtifactError> {
    Ok((path_segment(&table.schema)?, path_segment(&table.table)?))
}

fn path_segment(part: &str) -> Result<&str, ArtifactError> {
    if part.is_empty() || part == "." || part == ".." || part.contains(['/', '\\']) {
        return Err(ArtifactError::UnsafeName(part.to_string()));
    }
    Ok(part)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ArtifactError> {
    fs::write(path, contents).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })
}
