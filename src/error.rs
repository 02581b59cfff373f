//! Error types for the acquisition pipeline and its collaborators.
//!
//! Only [`InputError`] ever reaches the user as a hard failure. The
//! [`AcquisitionError`] variants drive the retry loop in
//! [`crate::acquisition`] and are absorbed into degraded content before the
//! record set leaves the pipeline.

use thiserror::Error;

/// Failures raised while querying the search engine or resolving articles.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Timeout, connection failure or non-2xx status.
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    /// The search results page could not be interpreted.
    #[error("failed to parse search results: {0}")]
    Parse(String),

    /// The structured article extractor gave up on a page.
    #[error("article extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("search results contained no candidate article links")]
    NoCandidates,

    #[error("no resolved article had enough content")]
    NoUsableArticles,
}

impl AcquisitionError {
    pub fn network(url: &str, reason: impl ToString) -> Self {
        AcquisitionError::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(url: &str, reason: impl ToString) -> Self {
        AcquisitionError::Extraction {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Internal summarizer fault; callers fall back to plain truncation.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("text contains no sentences")]
    NoSentences,
}

/// Speech synthesis failure.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("nothing to synthesize")]
    EmptyText,

    #[error("speech request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("speech service returned an empty payload")]
    EmptyAudio,
}

/// Preconditions checked before acquisition starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("company name must not be empty")]
    EmptyCompany,
}
