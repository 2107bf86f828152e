//! CLI argument parsing using clap derive

use clap::{ArgAction, Parser, Subcommand};

/// WordPress Git Updater - open pull requests for outdated plugins and themes
#[derive(Parser, Debug)]
#[command(name = "wpgitupdater")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a configuration file
    ///
    /// Writes .wpgitupdater.yml in the current directory. With --actions the
    /// GitHub Actions workflow is written instead.
    ///
    /// Examples:
    ///   wpgitupdater init                 # Create .wpgitupdater.yml
    ///   wpgitupdater init --ci --actions  # Create the workflow file
    Init {
        /// Create a CI config file (needs a provider such as --actions)
        #[arg(long, requires = "actions")]
        ci: bool,

        /// Create the GitHub Actions workflow file
        #[arg(long)]
        actions: bool,
    },

    /// Show the update status of every eligible extension
    ///
    /// Lists both plugins and themes unless one of them is selected.
    List {
        /// List plugins
        #[arg(long)]
        plugins: bool,

        /// List themes
        #[arg(long)]
        themes: bool,
    },

    /// Open update pull requests for outdated extensions
    Update {
        /// Stop short of creating update branches
        #[arg(long)]
        dry_run: bool,

        /// Include slugs, provider and repository in usage statistics
        #[arg(
            long,
            action = ArgAction::Set,
            default_value_t = true,
            num_args = 0..=1,
            default_missing_value = "true",
            value_name = "BOOL"
        )]
        stats: bool,
    },
}
