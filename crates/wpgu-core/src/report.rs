//! Per-extension results of a run

use crate::decision::UpdateStatus;
use crate::extension::ExtensionKind;

/// How processing of one extension ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate,
    /// The update branch is already on `origin`
    BranchExists { branch: String },
    /// Would have updated, but this is a dry run
    DryRun { branch: String },
    /// Branch pushed and pull request opened
    Updated {
        branch: String,
        pull_request: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub kind: ExtensionKind,
    pub slug: String,
    pub local_version: String,
    /// Registry version, when the registry had one
    pub remote_version: Option<String>,
    pub outcome: Outcome,
}

impl UpdateOutcome {
    /// The terminal state reached, in [`UpdateStatus`] terms.
    pub fn status(&self) -> UpdateStatus {
        match self.outcome {
            Outcome::UpToDate => UpdateStatus::UpToDate,
            Outcome::BranchExists { .. } => UpdateStatus::BranchAlreadyExists,
            Outcome::DryRun { .. } => UpdateStatus::DryRunSkipped,
            Outcome::Updated { .. } => UpdateStatus::Pending,
        }
    }
}

/// Everything that happened during one `update` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<UpdateOutcome>,
    /// Kinds switched off in the configuration
    pub disabled: Vec<ExtensionKind>,
}

impl RunReport {
    /// Outcomes that pushed a branch.
    pub fn updated(&self) -> impl Iterator<Item = &UpdateOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Updated { .. }))
    }

    pub fn find(&self, kind: ExtensionKind, slug: &str) -> Option<&UpdateOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.kind == kind && o.slug == slug)
    }
}
