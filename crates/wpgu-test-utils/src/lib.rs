//! Shared test utilities for the wpgitupdater workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures, including a bare `origin`
//! - [`site`]: [`TestSite`](site::TestSite) builder for WordPress checkouts
//! - [`archive`]: in-memory zip builders for registry downloads

pub mod archive;
pub mod git;
pub mod site;
