//! Page fetching.
//!
//! # Architecture
//!
//! - [`PageSource`]: core trait, "give me the HTML behind this URL"
//! - [`HttpFetcher`]: reqwest implementation with a browser-like header set
//!   and a fixed timeout
//!
//! There is no retry: a failed fetch is reported once and the calling
//! extractor degrades to its empty result.

use crate::config::SiteConfig;
use crate::error::{Result, ScrapeError};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// Source of raw HTML pages.
///
/// Implementors must not share per-call state between invocations; the
/// extractors may call `fetch` concurrently.
pub trait PageSource {
    /// Fetch `url` and return the decoded body.
    ///
    /// # Errors
    ///
    /// Fails on malformed URLs, network errors, timeouts and non-2xx statuses.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP page source backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client that attaches `config.headers` to every request and
    /// gives up after `config.timeout()`.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(header_map(config)?)
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }
}

fn header_map(config: &SiteConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScrapeError::Header {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        let val = HeaderValue::from_str(value).map_err(|e| ScrapeError::Header {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(key, val);
    }
    Ok(headers)
}

impl PageSource for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        let t0 = Instant::now();

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), %url, "Non-success status");
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
