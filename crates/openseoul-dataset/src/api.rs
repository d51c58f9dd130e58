//! Open-data portal client.

use serde_json::Value;

use openseoul_core::{get_json, HttpError};

/// One dataset endpoint.
///
/// `base_url` is everything before the range segments (portal host, access
/// key, response format, service name); requests go to
/// `{base_url}/{start}/{end}/`.
pub struct Client {
    base_url: String,
    auth_key: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>, auth_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let auth_key = auth_key.into();
        log::debug!("client ready: base={base_url} key={}", mask(&auth_key));
        Self { base_url, auth_key }
    }

    /// Access key issued by the portal. The portal embeds the key in the
    /// dataset URL, so it is never attached as a header.
    pub fn auth_key(&self) -> &str {
        &self.auth_key
    }

    /// GET one range of records (1-indexed, inclusive). Single attempt.
    pub fn fetch_page(&self, start: u64, end: u64) -> Result<Value, HttpError> {
        let url = self.page_url(start, end);
        log::debug!("GET {url}");
        get_json(&url)
    }

    fn page_url(&self, start: u64, end: u64) -> String {
        format!("{}/{start}/{end}/", self.base_url)
    }
}

/// Only the first few characters of a key may appear in logs.
fn mask(key: &str) -> String {
    if key.len() <= 4 {
        "****".to_string()
    } else {
        let head: String = key.chars().take(4).collect();
        format!("{head}****")
    }
}
