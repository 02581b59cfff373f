//! Command-line interface definitions for the news digest.
//!
//! Every tunable of the acquisition loop can also be set through an
//! environment variable so that scheduled runs don't need long command lines.

use crate::acquisition::{AcquisitionConfig, DEFAULT_ATTEMPTS, WORKER_POOL_SIZE};
use crate::models::NewsSource;
use crate::report::{IntensityBounds, SortOrder};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Report rendering written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Command-line arguments for the news digest.
///
/// # Examples
///
/// ```sh
/// # Latest coverage of a company
/// company_news_digest "Acme Robotics"
///
/// # Reuters only, one week, with layoffs in the query
/// company_news_digest Acme --source reuters --keywords layoffs \
///     --start-date 2024-01-01 --end-date 2024-01-07
///
/// # Negative articles only, as JSON, with a spoken summary
/// company_news_digest Acme --max-sentiment -0.05 --format json --audio-out acme.mp3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Company to search news for
    pub company: String,

    /// Start of the date window (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End of the date window (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Extra search terms appended to the company name
    #[arg(short, long, default_value = "")]
    pub keywords: String,

    /// Restrict results to a single news site
    #[arg(short, long, value_enum, default_value_t = NewsSource::All)]
    pub source: NewsSource,

    /// Drop articles with a compound score below this value
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub min_sentiment: f64,

    /// Drop articles with a compound score above this value
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub max_sentiment: f64,

    /// Article ordering in the report
    #[arg(long, value_enum, default_value_t = SortOrder::Relevance)]
    pub sort: SortOrder,

    /// Search attempts before giving up (0 skips the search entirely)
    #[arg(long, env = "NEWS_DIGEST_ATTEMPTS", default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Wait between search attempts, in milliseconds
    #[arg(long, env = "NEWS_DIGEST_BACKOFF_MS", default_value_t = 1000)]
    pub backoff_ms: u64,

    /// Concurrent article fetches and analyses
    #[arg(short, long, env = "NEWS_DIGEST_WORKERS", default_value_t = WORKER_POOL_SIZE)]
    pub workers: usize,

    /// Report format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write the spoken summary to this file (MP3)
    #[arg(long)]
    pub audio_out: Option<PathBuf>,

    /// Language of the spoken summary
    #[arg(long, default_value = "hi")]
    pub tts_lang: String,
}

impl Cli {
    pub fn acquisition_config(&self) -> AcquisitionConfig {
        AcquisitionConfig {
            attempts: self.attempts,
            backoff: Duration::from_millis(self.backoff_ms),
            workers: self.workers,
            ..AcquisitionConfig::default()
        }
    }

    pub fn intensity_bounds(&self) -> IntensityBounds {
        IntensityBounds {
            min: self.min_sentiment,
            max: self.max_sentiment,
        }
    }
}
