//! Data models shared by the acquisition pipeline, the post-processor and
//! the report renderer.
//!
//! - [`ArticleRecord`]: one fetched article, enriched in place after analysis
//! - [`Sentiment`]: the three-way label derived from a compound score
//! - [`SearchQuery`]: the assembled search query, built once per request
//! - [`Candidate`]: a link found on the search results page, before fetching
//! - [`FetchAttempt`]: bookkeeping for one pass of the retry loop
//! - [`NewsSource`]: the fixed set of source filters offered to the user

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title of the single record returned when every attempt came back empty.
pub const PLACEHOLDER_TITLE: &str =
    "No articles found. Search page structure may have changed or no recent news.";

/// Content of the synthetic placeholder record.
pub const NO_CONTENT: &str = "No content available.";

/// Content used when the fallback fetch itself failed.
pub const CONTENT_UNAVAILABLE: &str = "Content unavailable.";

/// A news article as it moves through the pipeline.
///
/// Acquisition fills `title`, `url` and `content`. The post-processor adds
/// `summary`, `sentiment` and `compound`; those stay `None` until then.
/// `content` is never empty for a record that leaves acquisition: it is either
/// real article text with more than ten words or one of the sentinel strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Headline text as shown on the search results page.
    pub title: String,
    /// Article URL. Empty for the synthetic placeholder.
    pub url: String,
    /// Extracted body text or a sentinel.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Signed compound score in `[-1, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound: Option<f64>,
}

impl ArticleRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            summary: None,
            sentiment: None,
            compound: None,
        }
    }

    /// The record handed back when acquisition found nothing usable.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TITLE, "", NO_CONTENT)
    }

    pub fn is_placeholder(&self) -> bool {
        self.url.is_empty() && self.title == PLACEHOLDER_TITLE
    }
}

/// Overall polarity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Score at or above which a text counts as positive.
    pub const POSITIVE_THRESHOLD: f64 = 0.05;
    /// Score at or below which a text counts as negative.
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    /// All labels, in the order used to break ties.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn from_compound(compound: f64) -> Self {
        if compound >= Self::POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= Self::NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source filter offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NewsSource {
    #[default]
    All,
    GoogleNews,
    YahooFinance,
    Reuters,
}

impl NewsSource {
    /// Human-readable name, also the basis of the `site:` restriction.
    pub fn display_name(&self) -> &'static str {
        match self {
            NewsSource::All => "All",
            NewsSource::GoogleNews => "Google News",
            NewsSource::YahooFinance => "Yahoo Finance",
            NewsSource::Reuters => "Reuters",
        }
    }
}

/// The pieces of a search query, assembled once and never mutated.
///
/// Empty strings mean the clause is absent. Each non-empty clause already
/// carries its own leading space so the query is plain concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub company_term: String,
    pub keyword_term: String,
    pub site_restriction: String,
    pub date_range_clause: String,
}

/// A link found on the search results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub href: String,
    pub display_text: String,
}

/// Outcome of one query-fetch-parse-resolve cycle.
#[derive(Debug, Clone, Copy)]
pub struct FetchAttempt {
    pub attempt_number: usize,
    pub success: bool,
    pub article_count_found: usize,
}
