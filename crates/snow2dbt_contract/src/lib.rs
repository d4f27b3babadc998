//! Contract Compiler
//!
//! Turns a reflected table into an enforced dbt model contract and the SQL
//! projection that goes with it.
//!
//! Both artifacts are rendered from the same compiled [`Contract`], so the
//! column names and their order in the YAML and in the `SELECT` list can
//! never drift apart.
//!
//! # Modules
//!
//! - [`naming`]: suffix/prefix/lower/snake_case pipeline for column names
//! - [`constraints`]: catalog flags to `primary_key`/`not_null`/`unique`
//! - [`contract`]: the compiled model
//! - [`compiler`]: snapshot to contract
//! - [`yaml`]: dbt `models:` document
//! - [`sql`]: `SELECT ... FROM {{ ref(...) }}` projection

pub mod compiler;
pub mod constraints;
pub mod contract;
pub mod error;
pub mod naming;
pub mod sql;
pub mod yaml;

pub use compiler::{CompileOptions, ContractCompiler};
pub use constraints::{infer_constraints, ConstraintKind};
pub use contract::{CompiledColumn, Contract};
pub use error::RenderError;
pub use naming::{snake_case, NamingOptions};
pub use sql::{render_projection, CommaStyle};
pub use yaml::render_contract_yaml;
