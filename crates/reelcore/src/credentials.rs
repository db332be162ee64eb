//! Session credentials replayed on every request.
//!
//! The credentials file is a JSON document exported from a logged-in browser
//! session:
//!
//! ```json
//! {
//!   "cookies": { "sessionid": "...", "csrftoken": "...", "ds_user_id": "..." },
//!   "headers": { "User-Agent": "...", "X-IG-App-ID": "936619743392459" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CredentialsError;

/// Cookie and header bundle loaded from the credentials file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cookies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headers: BTreeMap<String, String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Credentials {
    pub fn new(cookies: BTreeMap<String, String>, headers: BTreeMap<String, String>) -> Self {
        Self { cookies, headers }
    }

    /// Read credentials from a JSON file.
    ///
    /// A missing file is reported as [`CredentialsError::FileMissing`] so
    /// startup can fail with a clear message.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CredentialsError::FileMissing(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let credentials: Credentials = serde_json::from_str(&content)?;
        log::info!(
            "Loaded credentials from {} ({} cookies, {} headers)",
            path.display(),
            credentials.cookies.len(),
            credentials.headers.len()
        );
        Ok(credentials)
    }

    /// `name=value` pairs joined with `"; "`, in key order.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Build the header map sent with every request.
    ///
    /// An explicit `Cookie` entry in `headers` wins over the `cookies` map.
    pub fn to_header_map(&self) -> Result<HeaderMap, CredentialsError> {
        let mut map = HeaderMap::with_capacity(self.headers.len() + 1);
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| CredentialsError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| CredentialsError::InvalidHeader(name.clone()))?;
            map.insert(header_name, header_value);
        }

        if !map.contains_key(COOKIE) {
            if let Some(cookie) = self.cookie_header() {
                let value =
                    HeaderValue::from_str(&cookie).map_err(|_| CredentialsError::InvalidHeader("Cookie".to_string()))?;
                map.insert(COOKIE, value);
            }
        }

        Ok(map)
    }
}
