//! Structured article extraction.
//!
//! Downloads an article and runs Mozilla's readability algorithm over it in
//! one step. This is the preferred path for article text, but it is
//! best-effort: every failure collapses into an empty string and the
//! resolver decides whether to fall back.

use crate::error::AcquisitionError;
use crate::scrapers::identity::next_user_agent;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::io::Cursor;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::{debug, instrument};
use url::Url;

/// Timeout for the structured extractor's own download.
pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(7);

/// Best-effort article text extraction.
pub trait ArticleExtractor {
    /// Return the article body for `url`, or an empty string on any failure.
    async fn extract_article(&self, url: &str) -> String;
}

/// [`ArticleExtractor`] using the `readability` crate.
///
/// Owns its own HTTP client: the download is part of the extraction and is
/// independent of the page fetcher used by the fallback path.
#[derive(Debug, Clone)]
pub struct ReadabilityExtractor {
    client: Client,
    timeout: Duration,
}

impl ReadabilityExtractor {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, timeout })
    }

    async fn try_extract(&self, url: &str) -> Result<String, AcquisitionError> {
        let parsed = Url::parse(url).map_err(|e| AcquisitionError::extraction(url, e))?;

        let html = self
            .client
            .get(url)
            .header(USER_AGENT, next_user_agent())
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AcquisitionError::network(url, e))?
            .text()
            .await
            .map_err(|e| AcquisitionError::network(url, e))?;

        spawn_blocking(move || readable_text(&html, &parsed))
            .await
            .map_err(|e| AcquisitionError::extraction(url, e))?
            .map_err(|reason| AcquisitionError::extraction(url, reason))
    }
}

/// Run readability over an already downloaded page.
fn readable_text(html: &str, url: &Url) -> Result<String, String> {
    let mut cursor = Cursor::new(html.as_bytes());
    readability::extractor::extract(&mut cursor, url)
        .map(|product| product.text.trim().to_string())
        .map_err(|e| format!("{e:?}"))
}

impl ArticleExtractor for ReadabilityExtractor {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn extract_article(&self, url: &str) -> String {
        match self.try_extract(url).await {
            Ok(text) => {
                debug!(chars = text.len(), "Structured extraction succeeded");
                text
            }
            Err(e) => {
                debug!(error = %e, "Structured extraction failed; returning empty text");
                String::new()
            }
        }
    }
}
