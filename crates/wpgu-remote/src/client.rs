//! Shared blocking HTTP client setup

use reqwest::blocking::Client;

use crate::Result;

/// User agent sent with every request.
pub const USER_AGENT: &str = "wpgitupdater";

/// A blocking client identifying itself as the updater.
pub fn build() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}
