//! Profile command - list, select or clear the default dbt profile
//!
//! The default is a 1-based position in `profiles.yml`, stored in
//! `.snow2dbt_profile` in the working directory.

use crate::cli::config;
use crate::cli::error::explain;
use crate::cli::output::print_table;
use anyhow::Result;
use clap::Args;
use snow2dbt::identity::{
    FileProfileCache, IdentityResolver, ProfileStore, TerminalSecretProvider, YamlProfileSource,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// List the dbt profiles available (default action)
    #[arg(long, conflicts_with_all = ["select", "clear"])]
    pub list: bool,

    /// Use profile N (1-based, as shown by --list) by default
    #[arg(long, value_name = "N", conflicts_with = "clear")]
    pub select: Option<usize>,

    /// Forget the default profile
    #[arg(long)]
    pub clear: bool,

    /// Directory holding profiles.yml
    #[arg(long = "profiles-dir", alias = "profiles_dir", env = "DBT_PROFILES_DIR", value_name = "DIR")]
    pub profiles_dir: Option<PathBuf>,
}

pub fn run(args: ProfileArgs) -> Result<()> {
    let source = YamlProfileSource::new(config::dbt_profiles_path(args.profiles_dir.as_deref())?);
    let cache = FileProfileCache::new(config::profile_cache_path());
    let resolver = IdentityResolver::new(&source, &cache, &TerminalSecretProvider);

    if args.clear {
        return resolver.clear_default().map_err(explain);
    }
    if let Some(index) = args.select {
        resolver.select_default(index).map_err(explain)?;
        return Ok(());
    }

    let store = resolver.load_profiles().map_err(explain)?;
    let default = match resolver.default_index(&store) {
        Ok(index) => Some(index),
        Err(err) => {
            warn!("Ignoring default profile: {}", err);
            None
        }
    };
    info!("Total profile available: {}", store.len());
    print_table(
        &["Id", "Profile", "Account", "User", "Default"],
        profile_rows(&store, default),
    );
    Ok(())
}

/// One row per profile, `X` on the default.
pub fn profile_rows(store: &ProfileStore, default: Option<usize>) -> Vec<Vec<String>> {
    store
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let id = i + 1;
            vec![
                id.to_string(),
                profile.name.clone(),
                profile.account.clone().unwrap_or_default(),
                profile.user.clone().unwrap_or_default(),
                if default == Some(id) { "X" } else { "" }.to_string(),
            ]
        })
        .collect()
}
