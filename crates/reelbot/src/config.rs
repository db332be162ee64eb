//! Configuration for the bot, read lazily from the environment.
//!
//! `main` loads `.env` with dotenvy before anything here is touched.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server (e.g. a local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Upstream proxy for Instagram API requests
/// Read from PROXY environment variable (http://, https:// or socks5://)
pub static PROXY: Lazy<Option<String>> = Lazy::new(|| non_empty_var("PROXY"));

/// Directory holding the credentials file
/// Read from DATA_DIR environment variable
/// Default: data
pub static DATA_DIR: Lazy<String> = Lazy::new(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

/// Directory for rotating log files
/// Read from LOGS_DIR environment variable
/// Default: logs
pub static LOGS_DIR: Lazy<String> = Lazy::new(|| env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()));

/// Instagram session file (cookies + headers)
/// Read from INSTAGRAM_CREDENTIALS_FILE environment variable
/// Default: <DATA_DIR>/inst.json
pub static CREDENTIALS_FILE: Lazy<String> = Lazy::new(|| {
    env::var("INSTAGRAM_CREDENTIALS_FILE").unwrap_or_else(|_| format!("{}/inst.json", DATA_DIR.as_str()))
});

/// Log level for console and file output
/// Read from LOG_LEVEL environment variable
/// Default: info
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Instagram client configuration
pub mod instagram {
    use super::{env, Duration, Lazy};

    /// Default request timeout (in seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

    /// Number of posts fetched by the "latest posts" button
    pub const POSTS_PER_REQUEST: u32 = 3;

    /// Request timeout (in seconds)
    /// Read from INSTAGRAM_TIMEOUT_SECS environment variable
    pub static TIMEOUT_SECS: Lazy<u64> =
        Lazy::new(|| parse_timeout_secs(env::var("INSTAGRAM_TIMEOUT_SECS").ok().as_deref()));

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(*TIMEOUT_SECS)
    }

    /// Zero, negative or unparsable values fall back to the default.
    pub fn parse_timeout_secs(raw: Option<&str>) -> u64 {
        raw.and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// Telegram transport configuration
pub mod network {
    use super::Duration;

    /// Bot API HTTP timeout (in seconds), above the long-polling timeout
    pub const TIMEOUT_SECS: u64 = 60;

    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Log file configuration
pub mod logging {
    /// Log file name inside LOGS_DIR
    pub const LOG_FILE_NAME: &str = "bot.log";

    /// Rotate once the log file reaches 1 MiB
    pub const MAX_LOG_FILE_BYTES: u64 = 1024 * 1024;

    /// Rotated files kept next to the active one (bot.log.1 .. bot.log.4)
    pub const LOG_BACKUP_COUNT: usize = 4;
}

/// Telegram message limits
pub mod telegram {
    /// Items per sendMediaGroup call (Telegram accepts 2-10)
    pub const MEDIA_GROUP_LIMIT: usize = 10;

    /// Caption length limit for media messages (in characters)
    pub const MEDIA_CAPTION_LIMIT: usize = 1024;
}
