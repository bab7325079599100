// Meta Graph client: authenticated GET requests for the Threads API and the
// Instagram Graph API.
//
// Both APIs share the same shape: a base URL, query parameters, and an
// `access_token` parameter on every request. Pagination links come back as
// absolute URLs that already carry the token.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Per-request timeout for Graph API calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin reqwest wrapper with a generic GET helper.
pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    /// Create a client for the given API base URL.
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("trendwatch/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{path}` with `params` plus the access token, and
    /// deserialize the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        debug!(path = path, "Graph API GET request");

        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("access_token", self.access_token.as_str()));

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Graph API request failed: {path}"))?;

        Self::decode(response, path).await
    }

    /// GET an absolute URL as-is (pagination `next` links).
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Graph API GET next page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Graph API pagination request failed")?;

        Self::decode(response, "next page").await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Graph API {what} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {what} response"))
    }
}
