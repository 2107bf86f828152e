//! Core of the WordPress git updater
//!
//! - **Version comparison**: the registry's ordering of version strings
//! - **Discovery**: plugins and themes found through their header comments
//! - **Decision**: local version against the registry record
//! - **Updater**: the branch, replace, commit, push and pull request pipeline
//!
//! # Architecture
//!
//! ```text
//!                 wpgu-cli
//!                    |
//!       +------------+-------------+
//!       |                          |
//!   wpgu-core  <----------  wpgu-remote
//!       |
//!  +----+-----+---------+
//!  |          |         |
//! wpgu-fs  wpgu-git  wpgu-meta
//! ```

pub mod decision;
pub mod discovery;
pub mod error;
pub mod extension;
pub mod report;
pub mod services;
pub mod updater;
pub mod version;

pub use decision::{UpdateStatus, decide};
pub use discovery::{Header, HeaderError, discover};
pub use error::{Error, Result};
pub use extension::{DEFAULT_BRANCH_PREFIX, ExtensionDescriptor, ExtensionKind, RemoteMetadata};
pub use report::{Outcome, RunReport, UpdateOutcome};
pub use services::{ArtifactSource, PullRequest, PullRequests, Registry, UsageEvent, UsageReporter};
pub use updater::{Candidate, Services, UpdateOptions, Updater, survey};
pub use version::{Operator, compare, version_cmp};
