//! Filesystem helpers for the WordPress git updater
//!
//! Path handling, safe I/O, YAML config loading and
//! traversal-safe archive extraction.

pub mod archive;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use archive::extract_zip;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
