//! Git abstraction for the WordPress git updater
//!
//! The updater mutates exactly one checkout. [`GitWorkspace`] is the seam
//! the update pipeline drives; [`CliWorkspace`] implements it by shelling
//! out to `git` in that checkout.

pub mod cli;
pub mod error;
pub mod remote;
pub mod workspace;

pub use cli::CliWorkspace;
pub use error::{Error, Result};
pub use remote::{RemoteLocation, redact_credentials, rewrite_origin_url};
pub use workspace::{GitWorkspace, Identity};
