//! `projboard` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the project database.
//! - Run exactly one command per invocation and print its output.

mod commands;
mod config;
mod view;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use commands::{error_message, execute, Command};
use config::CliConfig;
use projboard_core::{init_logging, open_db, ProjectCollection, SqliteProjectStore};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "projboard")]
#[command(about = "Track projects, members and tasks from the terminal")]
#[command(version)]
struct Cli {
    /// Directory for the project database and logs
    #[arg(long, env = "PROJBOARD_HOME", default_value = "data", global = true)]
    data_dir: PathBuf,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Vec<String>> {
    let config = CliConfig::resolve(&cli.data_dir, cli.log_level.as_deref())?;
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "could not create data directory `{}`",
            config.data_dir.display()
        )
    })?;
    init_logging(&config.log_level, config.log_dir()).map_err(|err| anyhow!(err))?;

    let conn = open_db(config.db_path())
        .with_context(|| format!("could not open `{}`", config.db_path().display()))?;
    let mut collection = ProjectCollection::open(SqliteProjectStore::new(&conn))
        .map_err(|err| anyhow!(error_message(&err)))?;

    execute(&mut collection, cli.command).map_err(|err| anyhow!(error_message(&err)))
}
