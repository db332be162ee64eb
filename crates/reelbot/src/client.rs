//! Profile client construction from configuration.

use anyhow::{Context, Result};
use reelcore::{ClientOptions, InstagramClient};

use crate::config;

/// Build the Instagram client and log it in from the credentials file.
///
/// A missing or unreadable credentials file is fatal: the bot cannot do
/// anything useful without a session.
pub fn create_profile_client() -> Result<InstagramClient> {
    let options = ClientOptions {
        proxy: config::PROXY.clone(),
        timeout: config::instagram::timeout(),
        ..ClientOptions::default()
    };
    log::info!(
        "Creating Instagram client (timeout {}s, proxy {})",
        options.timeout.as_secs(),
        if options.proxy.is_some() { "enabled" } else { "disabled" }
    );

    let mut client = InstagramClient::new(options).context("Failed to build Instagram HTTP client")?;
    client
        .login_from_file(config::CREDENTIALS_FILE.as_str())
        .with_context(|| format!("Failed to load Instagram session from {}", config::CREDENTIALS_FILE.as_str()))?;

    Ok(client)
}
