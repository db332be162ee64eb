use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`ProfileClient`](crate::client::ProfileClient) operations.
///
/// Nothing in the client retries or swallows these: every failure reaches the
/// caller with its kind intact, so the chat layer can tell an unknown username
/// from an expired session or a dead network.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// An operation was attempted before credentials were installed.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The platform answered with a non-200 status.
    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Status 200, but the body is not JSON or lacks the expected path.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Network, TLS, proxy or timeout failure from the HTTP layer.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProfileError {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ProfileError::NotLoggedIn => "not_logged_in",
            ProfileError::RequestFailed { .. } => "request_failed",
            ProfileError::MalformedResponse(_) => "malformed_response",
            ProfileError::Transport(_) => "transport",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ProfileError::MalformedResponse(reason.into())
    }
}

/// Errors raised while loading or installing credentials.
#[derive(Error, Debug)]
pub enum CredentialsError {
    /// The credentials file does not exist. Fatal at startup.
    #[error("Credentials file not found: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse credentials file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A header name or value (or the composed cookie string) is not valid HTTP.
    #[error("Invalid header in credentials: {0}")]
    InvalidHeader(String),
}

/// Type alias for Result with ProfileError
pub type ProfileResult<T> = Result<T, ProfileError>;
