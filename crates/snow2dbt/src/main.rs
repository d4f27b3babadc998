//! snow2dbt
//!
//! Reverse-engineers a Snowflake table into an enforced dbt model contract
//! and its SQL projection.

use clap::{Parser, Subcommand};
use snow2dbt_logging::{init_logging, LogConfig};
use std::process::ExitCode;

mod cli;

use cli::error::HelpfulError;

#[derive(Parser, Debug)]
#[command(
    name = "snow2dbt",
    version,
    about = "Generate dbt contract YAML and SQL output for a Snowflake table"
)]
struct Cli {
    /// Enable verbose logging (debug to stderr and the log file)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List, select or clear the default dbt profile
    Profile(cli::profile::ProfileArgs),

    /// Reverse a Snowflake table into a dbt model
    Reverse(cli::reverse::ReverseArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "snow2dbt",
        verbose: cli.verbose,
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    let result = match cli.command {
        Commands::Profile(args) => cli::profile::run(args),
        Commands::Reverse(args) => cli::reverse::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<HelpfulError>() {
                Some(helpful) => eprint!("{}", helpful),
                None => eprintln!("{:?}", err),
            }
            ExitCode::from(1)
        }
    }
}
