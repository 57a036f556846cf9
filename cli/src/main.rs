//! devlaunch CLI - Run a dev server on a random free port
//!
//! With no arguments: allocate a port, open a temporary inbound firewall
//! rule, start the dev server and exit with its exit code.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devlaunch")]
#[command(author, version, about = "Run a dev server on a random free port")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project directory the dev server runs in (default: current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    /// Configuration file (default: <project>/devlaunch.json, then ~/.devlaunch/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not add a firewall rule
    #[arg(long, global = true)]
    no_firewall: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective configuration
    Config {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = commands::Options {
        project: cli.project,
        config: cli.config,
        no_firewall: cli.no_firewall,
    };

    match cli.command {
        Some(Commands::Config { json }) => commands::config::show(&options, json).await?,
        Some(Commands::Init { force }) => commands::config::init(&options, force).await?,
        None => {
            let code = commands::run::run(&options).await?;
            std::process::exit(code);
        }
    }

    Ok(())
}
