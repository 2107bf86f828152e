//! Command implementations for wpgu-cli

pub mod init;
pub mod list;
pub mod update;

pub use init::run_init;
pub use list::run_list;
pub use update::run_update;
