//! The per-extension update pipeline and the run loop around it
//!
//! For every enabled kind the run discovers extensions, asks the registry
//! about each one and then walks every extension through:
//!
//! ```text
//! UpToDate -> BranchExists -> DryRun -> Executing -> Done
//! ```
//!
//! stopping at the first state that applies. Executing mutates the working
//! tree, so extensions are processed strictly one after another and the
//! first failure ends the run. Nothing is rolled back.

use wpgu_fs::{NormalizedPath, extract_zip, io};
use wpgu_git::{GitWorkspace, Identity, RemoteLocation};
use wpgu_meta::Settings;
use wpgu_meta::templates::render;

use crate::Result;
use crate::decision::{UpdateStatus, decide};
use crate::discovery::discover;
use crate::extension::{DEFAULT_BRANCH_PREFIX, ExtensionDescriptor, ExtensionKind, RemoteMetadata};
use crate::report::{Outcome, RunReport, UpdateOutcome};
use crate::services::{
    ArtifactSource, PullRequest, PullRequests, Registry, UsageEvent, UsageReporter,
};

/// Switches for one `update` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Stop before anything is mutated
    pub dry_run: bool,
    /// Include slug and repository in usage reports
    pub stats: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            stats: true,
        }
    }
}

/// A discovered extension together with its registry record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub descriptor: ExtensionDescriptor,
    pub remote: Option<RemoteMetadata>,
    pub status: UpdateStatus,
}

/// Discover the extensions of `kind` and classify each one.
///
/// Read-only: this is what `list` shows and what a run starts from.
pub fn survey(
    settings: &Settings,
    registry: &dyn Registry,
    kind: ExtensionKind,
) -> Result<Vec<Candidate>> {
    let section = kind.config(&settings.config);
    let root = settings.extension_root(section, kind.plural());
    let pattern = section.pattern_or(kind.default_pattern());

    let found = discover(kind, &root, pattern, |slug| section.is_eligible(slug))?;

    found
        .into_values()
        .map(|descriptor| {
            tracing::debug!(kind = %kind, slug = %descriptor.slug, "Fetching registry record");
            let remote = registry.fetch(kind, &descriptor.slug)?;
            let status = decide(&descriptor, remote.as_ref());
            Ok(Candidate {
                descriptor,
                remote,
                status,
            })
        })
        .collect()
}

/// Pull request body: homepage, last update and the registry notes.
pub fn pull_request_body(kind: ExtensionKind, remote: &RemoteMetadata) -> String {
    format!(
        "**Homepage:** {}\n**{} Updated:** {}\n\n**{}:**\n\n{}",
        remote.homepage,
        kind.label(),
        remote.last_updated,
        kind.notes_heading(),
        remote.notes
    )
}

/// File name for a downloaded artifact, from the last URL path segment.
///
/// Falls back to `<slug>.zip` for names that are not a plain file name.
pub fn archive_name(url: &str, slug: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let candidate = path.rsplit('/').next().unwrap_or_default();
    let plain = !candidate.is_empty()
        && !candidate.starts_with('.')
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if plain {
        candidate.to_string()
    } else {
        format!("{slug}.zip")
    }
}

/// The collaborators a run talks to.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub registry: &'a dyn Registry,
    pub artifacts: &'a dyn ArtifactSource,
    pub pull_requests: &'a dyn PullRequests,
    /// Present only when usage reporting is enabled
    pub usage: Option<&'a dyn UsageReporter>,
}

/// Runs updates for one repository.
pub struct Updater<'a> {
    settings: &'a Settings,
    git: &'a dyn GitWorkspace,
    services: Services<'a>,
    identity: Identity,
    branch_prefix: String,
}

impl<'a> Updater<'a> {
    pub fn new(settings: &'a Settings, git: &'a dyn GitWorkspace, services: Services<'a>) -> Self {
        Self {
            settings,
            git,
            services,
            identity: Identity::bot(),
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
        }
    }

    pub fn with_branch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.branch_prefix = prefix.into();
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Run every enabled kind to completion or to the first failure.
    ///
    /// Outside a dry run the git config is prepared first and restored
    /// afterwards, whether or not the run succeeded. When both the run and
    /// the restore fail, the run's error is returned.
    pub fn run(&self, options: &UpdateOptions) -> Result<RunReport> {
        if options.dry_run {
            return self.process_all(options);
        }

        let token = self.settings.git_token()?;
        if let Err(e) = self.git.configure(&self.identity, token) {
            if let Err(restore_error) = self.git.restore() {
                tracing::debug!(error = %restore_error, "No git config to restore");
            }
            return Err(e.into());
        }

        let result = self.process_all(options);

        match (result, self.git.restore()) {
            (result, Ok(())) => result,
            (Ok(_), Err(restore_error)) => Err(restore_error.into()),
            (Err(e), Err(restore_error)) => {
                tracing::error!(error = %restore_error, "Failed to restore git config");
                Err(e)
            }
        }
    }

    fn process_all(&self, options: &UpdateOptions) -> Result<RunReport> {
        let mut report = RunReport::default();

        for kind in ExtensionKind::ALL {
            if !kind.config(&self.settings.config).enabled {
                tracing::info!(kind = %kind, "Updates disabled");
                report.disabled.push(kind);
                continue;
            }

            for candidate in survey(self.settings, self.services.registry, kind)? {
                let outcome = self.process(candidate, options)?;
                report.outcomes.push(outcome);
            }
        }

        Ok(report)
    }

    fn process(&self, candidate: Candidate, options: &UpdateOptions) -> Result<UpdateOutcome> {
        let Candidate {
            descriptor,
            remote,
            status,
        } = candidate;

        let mut outcome = UpdateOutcome {
            kind: descriptor.kind,
            slug: descriptor.slug.clone(),
            local_version: descriptor.version.clone(),
            remote_version: remote
                .as_ref()
                .map(|r| r.version.clone())
                .filter(|v| !v.is_empty()),
            outcome: Outcome::UpToDate,
        };

        let remote = match (status, remote) {
            (UpdateStatus::Pending, Some(remote)) => remote,
            _ => {
                tracing::info!(slug = %descriptor.slug, "Already up to date");
                return Ok(outcome);
            }
        };

        let branch = descriptor.branch_name(&self.branch_prefix, &remote.version);

        if self.git.branch_exists(&branch)? {
            tracing::info!(slug = %descriptor.slug, branch = %branch, "Update branch exists, skipping");
            outcome.outcome = Outcome::BranchExists { branch };
            return Ok(outcome);
        }

        if options.dry_run {
            tracing::info!(slug = %descriptor.slug, branch = %branch, "Dry run, skipping");
            outcome.outcome = Outcome::DryRun { branch };
            return Ok(outcome);
        }

        self.report_usage(&descriptor, options)?;
        let pull_request = self.execute(&descriptor, &remote, &branch)?;
        outcome.outcome = Outcome::Updated {
            branch,
            pull_request,
        };
        Ok(outcome)
    }

    fn report_usage(&self, descriptor: &ExtensionDescriptor, options: &UpdateOptions) -> Result<()> {
        let Some(usage) = self.services.usage else {
            return Ok(());
        };
        let location = self
            .git
            .remote_url()
            .ok()
            .and_then(|url| RemoteLocation::parse(&url));
        let event = UsageEvent::new(descriptor.kind, &descriptor.slug, location.as_ref(), options.stats);
        usage.report(&event)?;
        tracing::debug!(slug = %descriptor.slug, "Usage reported");
        Ok(())
    }

    /// Steps 1 to 10: branch, replace files, commit, push, go back, open
    /// the pull request.
    fn execute(
        &self,
        descriptor: &ExtensionDescriptor,
        remote: &RemoteMetadata,
        branch: &str,
    ) -> Result<Option<String>> {
        let kind = descriptor.kind;
        let slug = descriptor.slug.as_str();
        let section = kind.config(&self.settings.config);
        let root = self.settings.extension_root(section, kind.plural());

        let source = self.git.current_branch()?;
        tracing::info!(slug, branch, from = %source, "Creating update branch");
        self.git.create_branch(branch)?;

        let archive: NormalizedPath = root.join(&archive_name(&remote.download_url, slug));
        tracing::info!(slug, version = %remote.version, "Downloading");
        self.services.artifacts.download(&remote.download_url, &archive)?;

        tracing::info!(slug, path = %descriptor.path, "Replacing extension files");
        io::remove_dir_all(&descriptor.path)?;
        extract_zip(&archive, &root)?;
        io::remove_file(&archive)?;

        let replacements = descriptor.replacements(&remote.version);
        let message = render(section.commit_or(kind.default_commit_template()), &replacements);
        self.git.stage_all()?;
        self.git.commit(&message)?;

        tracing::info!(slug, branch, "Pushing update branch");
        self.git.push(branch)?;
        self.git.checkout(&source)?;

        let base = match self.settings.config.base_branch() {
            Some(base) => base.to_string(),
            None => source,
        };
        let request = PullRequest {
            title: render(section.title_or(kind.default_title_template()), &replacements),
            head: branch.to_string(),
            base,
            body: pull_request_body(kind, remote),
        };
        let url = self.services.pull_requests.create(&request)?;
        tracing::info!(slug, url = url.as_deref().unwrap_or("-"), "Pull request opened");

        Ok(url)
    }
}
