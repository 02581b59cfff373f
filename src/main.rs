//! # Company News Digest
//!
//! Fetches recent news about a company, extracts each article's text,
//! summarizes and scores it, and prints a comparative report with an
//! optional spoken summary.
//!
//! ## Usage
//!
//! ```sh
//! company_news_digest "Acme Robotics" --audio-out acme.mp3
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Query**: Build the search query from company, keywords, source and dates
//! 2. **Acquisition**: Fetch and parse search results, resolve article text
//!    (readability first, paragraph fallback second), retrying whole cycles
//! 3. **Processing**: Summarize and score every article (parallel, 4 at a time)
//! 4. **Report**: Filter, sort, compare, render to stdout and optionally speak

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod acquisition;
mod analysis;
mod cli;
mod error;
mod models;
mod outputs;
mod report;
mod scrapers;
mod tts;
mod utils;

use acquisition::Acquisition;
use analysis::PostProcessor;
use analysis::sentiment::LexiconScorer;
use analysis::summarize::FrequencySummarizer;
use cli::{Cli, OutputFormat};
use error::InputError;
use models::SearchQuery;
use outputs::{audio, json, markdown};
use report::Report;
use scrapers::fetch::HttpFetcher;
use scrapers::primary::{PRIMARY_TIMEOUT, ReadabilityExtractor};
use tts::{GoogleTts, SpeechSynthesizer};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("company_news_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let company = args.company.trim();
    if company.is_empty() {
        return Err(InputError::EmptyCompany.into());
    }

    // ---- Query ----
    let query = SearchQuery::build(
        company,
        args.start_date.as_deref(),
        args.end_date.as_deref(),
        &args.keywords,
        args.source,
    );

    // ---- Acquisition ----
    let acquisition = Acquisition::new(
        HttpFetcher::new()?,
        ReadabilityExtractor::new(PRIMARY_TIMEOUT)?,
        args.acquisition_config(),
    );
    let records = acquisition.acquire(&query).await;
    info!(count = records.len(), "Acquired articles");

    // ---- Post-processing ----
    let post = PostProcessor::new(
        Arc::new(FrequencySummarizer),
        Arc::new(LexiconScorer::new()),
        args.workers,
    );
    let records = post.process(records).await;

    // ---- Report ----
    let report = Report::build(company, records, args.intensity_bounds(), args.sort);
    info!(
        shown = report.articles.len(),
        dominant = ?report.dominant_sentiment,
        "Report built"
    );

    let rendered = match args.format {
        OutputFormat::Markdown => markdown::report_to_markdown(&report),
        OutputFormat::Json => json::report_to_json(&report)?,
    };
    println!("{rendered}");

    // ---- Spoken summary ----
    if let Some(path) = args.audio_out.as_deref() {
        match report.audio_sentence() {
            Some(sentence) => {
                let tts = GoogleTts::new()?;
                match tts.synthesize(&sentence, &args.tts_lang).await {
                    Ok(bytes) => {
                        if let Err(e) = audio::write_audio(path, &bytes).await {
                            warn!(path = %path.display(), error = %e, "Failed writing audio summary");
                        }
                    }
                    Err(e) => warn!(error = %e, "Speech synthesis failed; skipping audio summary"),
                }
            }
            None => warn!(
                min = args.min_sentiment,
                max = args.max_sentiment,
                "No articles fall inside the sentiment intensity window; no dominant sentiment, skipping audio summary"
            ),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
