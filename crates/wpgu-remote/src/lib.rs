//! Remote services for the WordPress git updater
//!
//! Blocking HTTP implementations of the collaborator traits in `wpgu-core`:
//!
//! - [`WordPressOrg`]: registry lookups and release downloads
//! - [`GitHub`]: pull requests
//! - [`HttpUsageReporter`]: usage reports

pub mod client;
pub mod error;
pub mod github;
pub mod usage;
pub mod wordpress;

pub use client::USER_AGENT;
pub use error::{Error, Result};
pub use github::GitHub;
pub use usage::{HttpUsageReporter, UsageMeta};
pub use wordpress::{WordPressOrg, parse_info};
