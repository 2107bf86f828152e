//! WordPress Git Updater CLI
//!
//! Keeps the plugins and themes committed to a site repository current by
//! opening one pull request per available update.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG`, defaulting to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!(
                "{} WordPress Git Updater v{}",
                "wpgitupdater".green().bold(),
                env!("CARGO_PKG_VERSION")
            );
            println!();
            println!("Run {} for available commands.", "wpgitupdater --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Init { ci: _, actions } => commands::run_init(&cwd, actions),
        Commands::List { plugins, themes } => commands::run_list(&cwd, plugins, themes),
        Commands::Update { dry_run, stats } => commands::run_update(&cwd, dry_run, stats),
    }
}
