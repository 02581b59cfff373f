//! Heuristic body-text extraction.
//!
//! Used when structured extraction comes back too short. The page is
//! fetched through the shared [`PageFetcher`] and scanned for paragraph
//! tags; pages without any `<p>` fall back to block containers carrying a
//! meaningful amount of text.

use crate::models::CONTENT_UNAVAILABLE;
use crate::scrapers::fetch::PageFetcher;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::{debug, instrument, warn};

/// Timeout for the fallback page fetch.
pub const FALLBACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimum trimmed text length for a `<div>` to count as content.
const MIN_BLOCK_CHARS: usize = 50;

/// Fetch `url` and extract its body text heuristically.
///
/// Returns [`CONTENT_UNAVAILABLE`] if the fetch itself fails; never errors.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn extract_fallback<F: PageFetcher>(fetcher: &F, url: &str, timeout: Duration) -> String {
    match fetcher.fetch(url, timeout).await {
        Ok(html) => match spawn_blocking(move || extract_body_text(&html)).await {
            Ok(text) => {
                debug!(chars = text.len(), "Fallback extraction finished");
                text
            }
            Err(e) => {
                warn!(error = %e, "Fallback parse task failed");
                String::new()
            }
        },
        Err(e) => {
            warn!(error = %e, "Fallback fetch failed");
            CONTENT_UNAVAILABLE.to_string()
        }
    }
}

/// Concatenate the text of every `<p>`, or failing that, of every `<div>`
/// whose visible text exceeds [`MIN_BLOCK_CHARS`].
pub fn extract_body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let paragraphs: Vec<ElementRef> = select_all(&document, "p");
    let nodes = if paragraphs.is_empty() {
        select_all(&document, "div")
            .into_iter()
            .filter(|div| stripped_len(div) > MIN_BLOCK_CHARS)
            .collect()
    } else {
        paragraphs
    };

    nodes
        .iter()
        .map(visible_text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn visible_text(element: &ElementRef) -> String {
    element.text().collect()
}

/// Length of the element's text with every text node trimmed, so markup
/// indentation between children does not count.
fn stripped_len(element: &ElementRef) -> usize {
    element.text().map(str::trim).collect::<String>().chars().count()
}
