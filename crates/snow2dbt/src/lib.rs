//! snow2dbt
//!
//! Reverse-engineers a Snowflake table into an enforced dbt model contract
//! (`<table>.yaml`) and a matching SQL projection (`<table>.sql`).
//!
//! Flow: [`identity`] picks the credentials, `snow2dbt_catalog` fetches the
//! table, `snow2dbt_contract` compiles and renders it, and [`artifacts`]
//! writes the pair under `<output>/<schema>/`.

pub mod artifacts;
pub mod error;
pub mod identity;
pub mod pipeline;

pub use artifacts::{output_names, ArtifactError, ArtifactWriter, WrittenArtifacts};
pub use error::{OutputError, Snow2DbtError};
pub use pipeline::{render_artifacts, reverse_table, RenderedArtifacts, ReverseOutcome, ReverseRequest};
