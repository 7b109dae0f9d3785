// src/linkedin/session.rs
//! Authenticated Voyager API session.
//!
//! The session is constructed from cookies obtained out of band (browser
//! login, cookie jar export). It owns the HTTP client and forwards the
//! cookies on every request; the CSRF token is derived from the `JSESSIONID`
//! cookie value.

use anyhow::{Context, Result};
use reqwest::Client;
use std::collections::BTreeMap;

pub const DEFAULT_BASE_URL: &str = "https://www.linkedin.com/voyager/api";

const ACCEPT_NORMALIZED_JSON: &str = "application/vnd.linkedin.normalized+json+2.1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct VoyagerSession {
    client: Client,
    base_url: String,
    cookies: BTreeMap<String, String>,
}

impl VoyagerSession {
    pub fn new(cookies: BTreeMap<String, String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            cookies,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// GET request builder for a Voyager path (path plus query string),
    /// with the normalized-JSON accept header and session cookies attached.
    pub fn get(&self, path_and_query: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path_and_query))
            .header("accept", ACCEPT_NORMALIZED_JSON)
            .header("Cookie", self.cookie_header())
    }

    /// POST request builder for a Voyager path, same headers as [`get`].
    pub fn post(&self, path_and_query: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path_and_query))
            .header("accept", ACCEPT_NORMALIZED_JSON)
            .header("Cookie", self.cookie_header())
    }

    /// The `Cookie` header value: `name=value` pairs joined with `; `.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// CSRF token for write-ish endpoints: the `JSESSIONID` cookie value
    /// with its surrounding quotes stripped.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookies
            .get("JSESSIONID")
            .map(|value| value.trim_matches('"').to_string())
    }
}
