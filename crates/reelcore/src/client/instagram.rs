//! `InstagramClient`: profile client backed by Instagram's private web API.
//!
//! Authenticates by replaying a browser session (cookies + headers) on every
//! request. Endpoints used:
//! - `GET /api/v1/users/web_profile_info/?username=<name>`: user id
//! - `GET /api/v1/feed/reels_media/?reel_ids=<user_id>`: active stories
//! - `GET /api/v1/feed/user/<user_id>/?count=<n>`: recent posts
//!
//! No retries, no pagination: one request per operation.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::BTreeMap;

use super::ProfileClient;
use crate::credentials::Credentials;
use crate::error::{CredentialsError, ProfileError, ProfileResult};
use crate::media::{post_from_item, story_from_item};
use crate::types::{Post, Story, UserId};

/// Instagram web origin.
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

const PROFILE_INFO_PATH: &str = "/api/v1/users/web_profile_info/";
const REELS_MEDIA_PATH: &str = "/api/v1/feed/reels_media/";

/// Transport settings. They live on the client rather than in the
/// credentials file, and can be changed before the client is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Origin the API paths are appended to.
    pub base_url: String,
    /// Upstream proxy for every scheme (`http://`, `https://`, `socks5://`).
    pub proxy: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Profile client using `reqwest`.
pub struct InstagramClient {
    http: reqwest::Client,
    options: ClientOptions,
    credentials: Credentials,
    /// Prepared from `credentials`; rebuilt whenever they change.
    request_headers: HeaderMap,
    logged_in: bool,
}

impl InstagramClient {
    /// Create a client that is not logged in yet.
    pub fn new(mut options: ClientOptions) -> ProfileResult<Self> {
        options.base_url = options.base_url.trim_end_matches('/').to_string();
        options.proxy = normalize_proxy(options.proxy);
        let http = build_http(&options)?;

        Ok(Self {
            http,
            options,
            credentials: Credentials::default(),
            request_headers: HeaderMap::new(),
            logged_in: false,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Install credentials and mark the session as logged in.
    pub fn login(&mut self, credentials: Credentials) -> Result<(), CredentialsError> {
        self.request_headers = credentials.to_header_map()?;
        self.credentials = credentials;
        self.logged_in = true;
        log::info!(
            "InstagramClient: logged in ({} cookies, {} headers)",
            self.credentials.cookies.len(),
            self.credentials.headers.len()
        );
        Ok(())
    }

    /// Load credentials from a JSON file and log in with them.
    pub fn login_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), CredentialsError> {
        let credentials = Credentials::from_file(path)?;
        self.login(credentials)
    }

    /// Replace the cookies. Does not change the logged-in state.
    pub fn set_cookies(&mut self, cookies: BTreeMap<String, String>) -> Result<(), CredentialsError> {
        let credentials = Credentials::new(cookies, self.credentials.headers.clone());
        self.request_headers = credentials.to_header_map()?;
        self.credentials = credentials;
        Ok(())
    }

    /// Replace the headers. Does not change the logged-in state.
    pub fn set_headers(&mut self, headers: BTreeMap<String, String>) -> Result<(), CredentialsError> {
        let credentials = Credentials::new(self.credentials.cookies.clone(), headers);
        self.request_headers = credentials.to_header_map()?;
        self.credentials = credentials;
        Ok(())
    }

    /// Route requests through `proxy`, or connect directly with `None`.
    pub fn set_proxy(&mut self, proxy: Option<String>) -> ProfileResult<()> {
        let options = ClientOptions {
            proxy: normalize_proxy(proxy),
            ..self.options.clone()
        };
        self.http = build_http(&options)?;
        self.options = options;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> ProfileResult<()> {
        let options = ClientOptions {
            timeout,
            ..self.options.clone()
        };
        self.http = build_http(&options)?;
        self.options = options;
        Ok(())
    }

    /// Authenticated GET returning the parsed JSON body.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> ProfileResult<Value> {
        if !self.logged_in {
            return Err(ProfileError::NotLoggedIn);
        }

        let url = format!("{}{}", self.options.base_url, path);
        log::info!("InstagramClient: GET {} {:?}", path, query);

        let response = self
            .http
            .get(&url)
            .headers(self.request_headers.clone())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            log::warn!("InstagramClient: {} returned {}", path, status);
            return Err(ProfileError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "InstagramClient: {} returned non-JSON ({}): {}",
                path,
                e,
                body.chars().take(300).collect::<String>()
            );
            ProfileError::MalformedResponse(format!("{} returned non-JSON body: {}", path, e))
        })
    }
}

#[async_trait]
impl ProfileClient for InstagramClient {
    async fn resolve_user_id(&self, username: &str) -> ProfileResult<UserId> {
        let body = self
            .get_json(PROFILE_INFO_PATH, &[("username", username.to_string())])
            .await?;

        // id is a string today; older payloads used a number
        match body.pointer("/data/user/id") {
            Some(Value::String(id)) => Ok(UserId::new(id.clone())),
            Some(Value::Number(id)) => Ok(UserId::new(id.to_string())),
            _ => Err(ProfileError::MalformedResponse(format!(
                "data.user.id missing in profile response for {}",
                username
            ))),
        }
    }

    async fn list_stories(&self, user_id: &UserId) -> ProfileResult<Vec<Story>> {
        let body = self
            .get_json(REELS_MEDIA_PATH, &[("reel_ids", user_id.to_string())])
            .await?;

        let items = body
            .get("reels")
            .and_then(|reels| reels.get(user_id.as_str()))
            .and_then(|reel| reel.get("items"))
            .and_then(Value::as_array);

        let Some(items) = items else {
            log::info!("InstagramClient: no active stories for user_id={}", user_id);
            return Ok(Vec::new());
        };

        let stories = items.iter().map(story_from_item).collect::<ProfileResult<Vec<_>>>()?;
        log::info!("InstagramClient: found {} stories for user_id={}", stories.len(), user_id);
        Ok(stories)
    }

    async fn list_posts(&self, user_id: &UserId, count: u32) -> ProfileResult<Vec<Post>> {
        let path = format!("/api/v1/feed/user/{}/", user_id);
        let body = self.get_json(&path, &[("count", count.to_string())]).await?;

        let posts = match body.get("items").and_then(Value::as_array) {
            Some(items) => items.iter().map(post_from_item).collect::<ProfileResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        log::info!("InstagramClient: feed returned {} posts for user_id={}", posts.len(), user_id);
        Ok(posts)
    }
}

impl fmt::Debug for InstagramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // cookie values are session secrets
        f.debug_struct("InstagramClient")
            .field("options", &self.options)
            .field("cookies", &self.credentials.cookies.keys().collect::<Vec<_>>())
            .field("headers", &self.credentials.headers.len())
            .field("logged_in", &self.logged_in)
            .finish()
    }
}

/// Blank or `none`/`disabled` means no proxy.
fn normalize_proxy(proxy: Option<String>) -> Option<String> {
    proxy
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && p != "none" && p != "disabled")
}

fn build_http(options: &ClientOptions) -> ProfileResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(options.timeout);
    if let Some(ref proxy_url) = options.proxy {
        log::info!("InstagramClient: using proxy for API requests");
        builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }
    Ok(builder.build()?)
}
