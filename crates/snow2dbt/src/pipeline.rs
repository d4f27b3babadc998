//! The reverse pipeline: fetch, compile, render, write.

use crate::artifacts::{ArtifactWriter, WrittenArtifacts};
use crate::error::Result;
use snow2dbt_catalog::{fetch_table_snapshot, CatalogClient, TableRef};
use snow2dbt_contract::{
    render_contract_yaml, render_projection, CommaStyle, CompileOptions, Contract,
    ContractCompiler,
};
use std::path::PathBuf;
use tracing::info;

/// One table to reverse and how to shape the output.
#[derive(Debug, Clone)]
pub struct ReverseRequest {
    pub table: TableRef,
    pub compile: CompileOptions,
    pub comma: CommaStyle,
    pub output_dir: PathBuf,
}

/// Both artifacts as text, before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub yaml: String,
    pub sql: String,
}

#[derive(Debug, Clone)]
pub struct ReverseOutcome {
    pub contract: Contract,
    pub written: WrittenArtifacts,
}

/// Render both artifacts from the same contract.
pub fn render_artifacts(contract: &Contract, comma: CommaStyle) -> Result<RenderedArtifacts> {
    Ok(RenderedArtifacts {
        yaml: render_contract_yaml(contract)?,
        sql: render_projection(contract, comma),
    })
}

/// Reverse one table through an already authenticated catalog client.
pub fn reverse_table<C: CatalogClient + ?Sized>(
    client: &C,
    request: &ReverseRequest,
) -> Result<ReverseOutcome> {
    let snapshot = fetch_table_snapshot(client, &request.table)?;
    let contract = ContractCompiler::new(request.compile.clone()).compile(&snapshot);
    let rendered = render_artifacts(&contract, request.comma)?;
    let written =
        ArtifactWriter::new(&request.output_dir).write(&contract, &rendered.yaml, &rendered.sql)?;

    info!(
        "Reversing table {}.{} into model has been completed",
        request.table.schema, request.table.table
    );
    Ok(ReverseOutcome { contract, written })
}
