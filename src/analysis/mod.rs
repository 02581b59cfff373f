//! Parallel post-processing of acquired articles.
//!
//! Each record is summarized and scored independently on the blocking
//! thread pool, at most [`crate::acquisition::WORKER_POOL_SIZE`] at a time.
//! The output has the same length and order as the input.
//!
//! # Submodules
//!
//! - [`summarize`]: extractive summarizer and the card summary rules
//! - [`sentiment`]: lexicon scorer producing compound scores and labels

pub mod sentiment;
pub mod summarize;

use crate::models::{ArticleRecord, Sentiment};
use crate::utils::truncate_with_ellipsis;
use futures::stream::{self, StreamExt};
use sentiment::SentimentScorer;
use std::sync::Arc;
use summarize::{FALLBACK_CHARS, Summarizer, summarize_content};
use tokio::task::spawn_blocking;
use tracing::{error, info, instrument};

/// Result of analysing one article's content.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub compound: f64,
    pub sentiment: Sentiment,
}

impl Analysis {
    /// Used when the analysis worker itself died.
    fn degraded(content: &str) -> Self {
        Self {
            summary: truncate_with_ellipsis(content, FALLBACK_CHARS),
            compound: 0.0,
            sentiment: Sentiment::Neutral,
        }
    }

    fn apply(self, mut record: ArticleRecord) -> ArticleRecord {
        record.summary = Some(self.summary);
        record.compound = Some(self.compound);
        record.sentiment = Some(self.sentiment);
        record
    }
}

/// Summarize and score `content`.
pub fn analyze<S, C>(summarizer: &S, scorer: &C, content: &str) -> Analysis
where
    S: Summarizer + ?Sized,
    C: SentimentScorer + ?Sized,
{
    let compound = scorer.compound(content);
    Analysis {
        summary: summarize_content(summarizer, content),
        compound,
        sentiment: Sentiment::from_compound(compound),
    }
}

/// Fans analysis out over a record set with bounded concurrency.
///
/// The summarizer and scorer are built once and shared read-only by every
/// worker.
pub struct PostProcessor<S, C> {
    summarizer: Arc<S>,
    scorer: Arc<C>,
    workers: usize,
}

impl<S, C> PostProcessor<S, C>
where
    S: Summarizer + 'static,
    C: SentimentScorer + 'static,
{
    pub fn new(summarizer: Arc<S>, scorer: Arc<C>, workers: usize) -> Self {
        Self {
            summarizer,
            scorer,
            workers: workers.max(1),
        }
    }

    /// Add `summary`, `compound` and `sentiment` to every record.
    #[instrument(level = "info", skip_all, fields(count = records.len(), workers = self.workers))]
    pub async fn process(&self, records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        let processed: Vec<ArticleRecord> = stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| {
                let summarizer = Arc::clone(&self.summarizer);
                let scorer = Arc::clone(&self.scorer);
                async move {
                    let content = record.content.clone();
                    let analysis = spawn_blocking(move || {
                        analyze(summarizer.as_ref(), scorer.as_ref(), &content)
                    })
                    .await
                    .unwrap_or_else(|e| {
                        error!(index, error = %e, "Analysis worker failed; using truncated content");
                        Analysis::degraded(&record.content)
                    });
                    analysis.apply(record)
                }
            })
            .buffered(self.workers)
            .collect()
            .await;

        info!(count = processed.len(), "Post-processing complete");
        processed
    }
}
