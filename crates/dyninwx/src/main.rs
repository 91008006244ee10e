//! # dyninwx
//!
//! Command line updater for INWX resource records: discovers the host's
//! public IPv4/IPv6 addresses through configured ident endpoints and
//! pushes `nameserver.updateRecord` calls for the configured record ids.

mod commands;
mod paths;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dyninwx_core::config::Settings;

#[derive(Parser)]
#[command(
    name = "dyninwx",
    version,
    about = "Updates INWX resource records or displays their current state."
)]
struct Cli {
    /// Settings file (defaults to the per-user configuration directory)
    #[arg(short = 's', long = "settings", global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Update the configured resource records with the current public addresses
    Update,
    /// List all known nameserver records
    List {
        /// Domain name to list (`*` lists every domain)
        #[arg(default_value = "*")]
        domain: String,

        /// Emit records as JSON instead of log lines
        #[arg(long)]
        json: bool,
    },
    /// Resolve and show the public IP addresses
    Ip {
        /// Show results from all resolvers
        #[arg(short = 'a', long)]
        all: bool,

        /// Never show IPv4 results
        #[arg(long = "no-ipv4")]
        no_ipv4: bool,

        /// Never show IPv6 results
        #[arg(long = "no-ipv6")]
        no_ipv6: bool,
    },
    /// Show the projected settings
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            error!("{error:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let settings_file = match cli.settings {
        Some(path) => {
            anyhow::ensure!(
                path.exists(),
                "settings file [{}] does not exist",
                path.display()
            );
            path
        }
        None => paths::default_settings_file()?,
    };

    info!("using settings file [{}]", settings_file.display());
    let settings = Settings::load(&settings_file)?;

    match cli.command {
        Command::Update => commands::update::run(&settings).await,
        Command::List { domain, json } => commands::list::run(&settings, &domain, json).await,
        Command::Ip {
            all,
            no_ipv4,
            no_ipv6,
        } => commands::ip::run(&settings, all, no_ipv4, no_ipv6).await,
        Command::Status => commands::status::run(&settings),
    }
}
