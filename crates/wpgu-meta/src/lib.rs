//! Configuration and settings for the WordPress git updater.
//!
//! This crate owns the `.wpgitupdater.yml` schema, the supported schema
//! versions, eligibility rules and the [`Settings`] value that the rest of
//! the workspace receives instead of reading process state itself.

pub mod config;
pub mod error;
pub mod settings;
pub mod templates;

pub use config::{CONFIG_FILE, CONFIG_VERSION, Config, ExtensionConfig, SUPPORTED_CONFIG_VERSIONS};
pub use error::{Error, Result};
pub use settings::{Environment, Settings};
