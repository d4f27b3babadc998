//! Reverse command - turn one Snowflake table into a dbt model
//!
//! Everything that can be checked locally (table reference, output names, auth
//! mode, naming options) is checked before any network call.

use crate::cli::config;
use crate::cli::error::explain;
use anyhow::Result;
use clap::Args;
use snow2dbt::identity::{
    AuthMode, AuthRequest, FileProfileCache, IdentityResolver, ProfileSource, ProfileStore,
    TerminalSecretProvider, YamlProfileSource,
};
use snow2dbt::{output_names, reverse_table, ReverseRequest, Snow2DbtError};
use snow2dbt_catalog::{SnowflakeClient, SnowflakeConfig, TableRef};
use snow2dbt_contract::{CommaStyle, CompileOptions, NamingOptions};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReverseArgs {
    /// Complete Snowflake table ID (<database>.<schema>.<table>)
    #[arg(long)]
    pub target: Option<String>,

    /// Authentication: profile (dbt profiles.yml, alias dbt) or standard
    #[arg(long = "auth_mode", alias = "auth-mode", default_value = "profile")]
    pub auth_mode: String,

    /// dbt profile to use instead of the default one (profile auth)
    #[arg(long)]
    pub profile: Option<String>,

    /// Snowflake account identifier (standard auth)
    #[arg(long, env = "SNOWFLAKE_ACCOUNT")]
    pub account: Option<String>,

    /// Snowflake user (standard auth)
    #[arg(long, env = "SNOWFLAKE_USER")]
    pub username: Option<String>,

    /// Warehouse for the session
    #[arg(long)]
    pub warehouse: Option<String>,

    /// Role for the session
    #[arg(long)]
    pub role: Option<String>,

    /// Prefix to add to column names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Suffix to add to column names
    #[arg(long)]
    pub suffix: Option<String>,

    /// Lowercase type names in YAML file
    #[arg(short = 'l', long)]
    pub lower: bool,

    /// Lowercase column names (before --snake)
    #[arg(long = "lower_names", alias = "lower-names")]
    pub lower_names: bool,

    /// Convert column names to snake_case
    #[arg(long)]
    pub snake: bool,

    /// Put commas at the start of each SQL column line
    #[arg(long = "leading_comma", alias = "leading-comma")]
    pub leading_comma: bool,

    /// Model description written to the YAML file
    #[arg(long)]
    pub description: Option<String>,

    /// Output folder of scripts
    #[arg(long, env = "SNOW2DBT_OUTPUT", default_value_os_t = config::default_output_dir())]
    pub output: PathBuf,

    /// Directory holding profiles.yml (profile auth)
    #[arg(long = "profiles-dir", alias = "profiles_dir", env = "DBT_PROFILES_DIR", value_name = "DIR")]
    pub profiles_dir: Option<PathBuf>,
}

/// Local validation: the table, the auth request and the compile options.
pub fn plan(args: &ReverseArgs) -> Result<(ReverseRequest, AuthRequest), Snow2DbtError> {
    let table = TableRef::parse(args.target.as_deref().unwrap_or_default())?;
    output_names(&table)?;

    let auth = match args.auth_mode.parse::<AuthMode>()? {
        AuthMode::Profile => AuthRequest::profile(args.profile.clone()),
        AuthMode::Standard => AuthRequest::standard(args.account.clone(), args.username.clone()),
    };

    let mut naming = NamingOptions::default()
        .lower(args.lower_names)
        .snake(args.snake);
    if let Some(prefix) = &args.prefix {
        naming = naming.with_prefix(prefix);
    }
    if let Some(suffix) = &args.suffix {
        naming = naming.with_suffix(suffix);
    }

    let request = ReverseRequest {
        table,
        compile: CompileOptions {
            naming,
            lower_types: args.lower,
            description: args.description.clone(),
        },
        comma: CommaStyle::leading(args.leading_comma),
        output_dir: args.output.clone(),
    };
    Ok((request, auth))
}

/// `profiles.yml` is only located in profile mode; standard mode never reads it.
fn profile_source(mode: AuthMode, profiles_dir: Option<&Path>) -> Result<Box<dyn ProfileSource>> {
    match mode {
        AuthMode::Profile => Ok(Box::new(YamlProfileSource::new(
            config::dbt_profiles_path(profiles_dir)?,
        ))),
        AuthMode::Standard => Ok(Box::new(ProfileStore::default())),
    }
}

pub fn run(args: ReverseArgs) -> Result<()> {
    let (request, auth) = plan(&args).map_err(explain)?;
    info!("Reversing table {}", request.table);

    let source = profile_source(auth.mode, args.profiles_dir.as_deref())?;
    let cache = FileProfileCache::new(config::profile_cache_path());
    let resolver = IdentityResolver::new(source.as_ref(), &cache, &TerminalSecretProvider);
    let resolved = resolver.resolve(&auth).map_err(explain)?;

    let snowflake = SnowflakeConfig::from_env()
        .with_warehouse(args.warehouse)
        .with_role(args.role);
    let client = SnowflakeClient::connect(&resolved.identity, snowflake).map_err(explain)?;

    let outcome = reverse_table(&client, &request).map_err(explain)?;
    println!("{}", outcome.written.yaml_path.display());
    println!("{}", outcome.written.sql_path.display());
    Ok(())
}
