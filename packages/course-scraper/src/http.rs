//! Document loading over HTTP.
//!
//! Extractors and the catalog mapper depend on the [`DocumentLoader`] trait
//! rather than on `reqwest` directly, so tests can serve canned documents.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ScraperConfig;
use crate::error::Result;

/// User agent string identifying this scraper.
const USER_AGENT: &str = concat!("uvic-course-scraper/", env!("CARGO_PKG_VERSION"));

/// Fetches documents by URL.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Fetch the body of `url` as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetch `url` and decode the body as JSON.
pub async fn fetch_json<T, L>(loader: &L, url: &str) -> Result<T>
where
    T: DeserializeOwned,
    L: DocumentLoader + ?Sized,
{
    let body = loader.fetch_text(url).await?;
    Ok(serde_json::from_str(&body)?)
}

/// [`DocumentLoader`] backed by a `reqwest` client.
///
/// Requests are made once. Non-2xx responses become [`crate::ScraperError::Http`].
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: Client,
}

impl HttpLoader {
    /// Create a loader with the timeout from `config`.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentLoader for HttpLoader {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Fetching document");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "Fetched document");
        Ok(body)
    }
}
