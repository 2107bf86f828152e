//! Classifying a local extension against its registry record

use std::fmt;

use crate::extension::{ExtensionDescriptor, RemoteMetadata};
use crate::version::{Operator, compare};

/// Where an extension stands for this run. Recomputed every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Pending,
    BranchAlreadyExists,
    DryRunSkipped,
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpdateStatus::UpToDate => "uptodate",
            UpdateStatus::Pending => "outdated",
            UpdateStatus::BranchAlreadyExists => "branch-exists",
            UpdateStatus::DryRunSkipped => "dry-run",
        })
    }
}

/// `Pending` when the registry has a strictly newer version, otherwise
/// `UpToDate`. A missing record or empty remote version is `UpToDate`.
pub fn decide(local: &ExtensionDescriptor, remote: Option<&RemoteMetadata>) -> UpdateStatus {
    match remote {
        Some(remote) if !remote.version.is_empty() => {
            if compare(&local.version, &remote.version, Operator::Lt) {
                UpdateStatus::Pending
            } else {
                UpdateStatus::UpToDate
            }
        }
        _ => UpdateStatus::UpToDate,
    }
}
