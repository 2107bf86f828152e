//! Update command: branch, commit and propose every outdated extension

use std::path::Path;

use colored::Colorize;
use wpgu_core::{
    Outcome, PullRequest, PullRequests, RunReport, Services, UpdateOptions, Updater,
    UsageReporter,
};
use wpgu_fs::NormalizedPath;
use wpgu_git::{CliWorkspace, GitWorkspace, RemoteLocation};
use wpgu_meta::{CONFIG_VERSION, Environment, Settings};
use wpgu_remote::{GitHub, HttpUsageReporter, UsageMeta, WordPressOrg};

use crate::error::{CliError, Result};

/// Pull request target for the run.
///
/// Dry runs never open pull requests, so they do not need a GitHub origin
/// or a token.
enum PullRequestTarget {
    GitHub(GitHub),
    Disabled,
}

impl PullRequests for PullRequestTarget {
    fn create(&self, request: &PullRequest) -> wpgu_core::Result<Option<String>> {
        match self {
            Self::GitHub(github) => github.create(request),
            Self::Disabled => Err(wpgu_core::Error::PullRequest {
                head: request.head.clone(),
                message: "pull requests are disabled for this run".to_string(),
            }),
        }
    }
}

fn usage_meta() -> UsageMeta {
    UsageMeta {
        build: option_env!("WPGU_BUILD").unwrap_or("dev-build").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config_version: CONFIG_VERSION.to_string(),
    }
}

fn pull_request_target(
    settings: &Settings,
    git: &dyn GitWorkspace,
    dry_run: bool,
) -> Result<PullRequestTarget> {
    if dry_run {
        return Ok(PullRequestTarget::Disabled);
    }
    let token = settings.git_token()?;
    let origin = git.remote_url()?;
    let location = RemoteLocation::parse(&origin).ok_or_else(|| {
        CliError::user(format!(
            "Cannot determine the repository from origin '{}'",
            wpgu_git::redact_credentials(&origin)
        ))
    })?;
    Ok(PullRequestTarget::GitHub(GitHub::new(&location, token)?))
}

/// Run the update command
pub fn run_update(root: &Path, dry_run: bool, stats: bool) -> Result<()> {
    let settings = Settings::load(NormalizedPath::new(root), Environment::from_process())?;
    let git = CliWorkspace::new(settings.root.clone())?;

    let registry = WordPressOrg::new()?;
    let pull_requests = pull_request_target(&settings, &git, dry_run)?;
    let usage = match settings.updater_token() {
        Some(token) => Some(HttpUsageReporter::new(&settings.api_url, token, usage_meta())?),
        None => None,
    };

    let services = Services {
        registry: &registry,
        artifacts: &registry,
        pull_requests: &pull_requests,
        usage: usage.as_ref().map(|u| u as &dyn UsageReporter),
    };

    if dry_run {
        println!("{} Performing updates (dry run)", "=>".blue().bold());
    } else {
        println!("{} Performing updates", "=>".blue().bold());
    }

    let report = Updater::new(&settings, &git, services).run(&UpdateOptions { dry_run, stats })?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    for kind in &report.disabled {
        println!("{} {} updates disabled", "SKIP".yellow().bold(), kind.label());
    }

    for outcome in &report.outcomes {
        let versions = match &outcome.remote_version {
            Some(remote) => format!("{} -> {}", outcome.local_version, remote),
            None => outcome.local_version.clone(),
        };
        let slug = outcome.slug.as_str();
        match &outcome.outcome {
            Outcome::UpToDate => {
                println!("{} {slug} is up to date ({versions})", "OK".green().bold());
            }
            Outcome::BranchExists { branch } => {
                println!(
                    "{} {slug} ({versions}): branch {} already exists",
                    "SKIP".yellow().bold(),
                    branch.cyan()
                );
            }
            Outcome::DryRun { branch } => {
                println!(
                    "{} {slug} ({versions}): would create {}",
                    "SKIP".yellow().bold(),
                    branch.cyan()
                );
            }
            Outcome::Updated {
                branch,
                pull_request,
            } => {
                println!(
                    "{} {slug} ({versions}): pushed {}",
                    "OK".green().bold(),
                    branch.cyan()
                );
                if let Some(url) = pull_request {
                    println!("   {}", url.dimmed());
                }
            }
        }
    }

    let updated = report.updated().count();
    println!(
        "{} {} of {} extensions updated",
        "Total:".dimmed(),
        updated,
        report.outcomes.len()
    );
}
