//! Single-page HTTP fetching.
//!
//! [`PageFetcher`] is the seam between the pipeline and the network: the
//! orchestrator uses it for the search results page and the fallback
//! extractor uses it for article pages. There is no retry at this layer.

use crate::error::AcquisitionError;
use crate::scrapers::identity::next_user_agent;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Fetch one page body.
pub trait PageFetcher {
    /// GET `url` with a rotated identity, failing on timeout, connection
    /// error or a non-2xx status.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, AcquisitionError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, AcquisitionError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, next_user_agent())
            .timeout(timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, elapsed_ms = t0.elapsed().as_millis() as u64, "Page request failed");
                AcquisitionError::network(url, e)
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| AcquisitionError::network(url, e))?;

        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
