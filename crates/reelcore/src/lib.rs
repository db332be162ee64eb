//! reelcore - Instagram profile client for the reelbot Telegram bot
//!
//! This library has no Telegram dependency. It provides:
//!
//! - `client`: the `ProfileClient` capability trait and `InstagramClient`,
//!   which replays a browser session against the private web API
//! - `media`: normalization of raw media nodes into `MediaItem`s
//! - `credentials`: the cookie/header bundle loaded from a JSON file
//! - `types`: `MediaItem`, `Post`, `Story`, `UserId`
//! - `error`: `ProfileError` and `CredentialsError`

pub mod client;
pub mod credentials;
pub mod error;
pub mod media;
pub mod types;

// Re-export commonly used types for convenience
pub use client::{ClientOptions, InstagramClient, ProfileClient, DEFAULT_POST_COUNT};
pub use credentials::Credentials;
pub use error::{CredentialsError, ProfileError, ProfileResult};
pub use media::classify_and_extract;
pub use types::{MediaItem, MediaKind, Post, Story, UserId};
