//! Search results page parsing.
//!
//! Result markup changes often, so links are located with an ordered chain
//! of selector strategies. The first strategy that matches anything wins and
//! the later ones are never consulted; matches are never merged across
//! strategies.
//!
//! | Priority | Selector | Targets |
//! |----------|----------|---------|
//! | 1 | `a.title` | classic result headline anchors |
//! | 2 | `a.news-card__title` | card-style layout |
//! | 3 | `a[target="_blank"]` | any link opening a new browsing context |

use crate::error::AcquisitionError;
use crate::models::Candidate;
use crate::utils::collapse_whitespace;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

/// Upper bound on links taken from one results page.
pub const MAX_CANDIDATES: usize = 20;

/// One way of finding result links in a parsed page.
pub type Strategy = fn(&Html) -> Result<Vec<Candidate>, AcquisitionError>;

/// Strategies in priority order.
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("title", title_anchors),
    ("news-card title", news_card_anchors),
    ("new-context", new_context_anchors),
];

fn title_anchors(document: &Html) -> Result<Vec<Candidate>, AcquisitionError> {
    select_anchors(document, "a.title")
}

fn news_card_anchors(document: &Html) -> Result<Vec<Candidate>, AcquisitionError> {
    select_anchors(document, "a.news-card__title")
}

fn new_context_anchors(document: &Html) -> Result<Vec<Candidate>, AcquisitionError> {
    select_anchors(document, r#"a[target="_blank"]"#)
}

fn select_anchors(document: &Html, css: &str) -> Result<Vec<Candidate>, AcquisitionError> {
    let selector = Selector::parse(css).map_err(|e| AcquisitionError::Parse(e.to_string()))?;
    Ok(document
        .select(&selector)
        .map(|element| Candidate {
            href: element.value().attr("href").unwrap_or_default().to_string(),
            display_text: collapse_whitespace(&element.text().collect::<String>()),
        })
        .collect())
}

/// Run `strategies` in order and return the first non-empty match set.
pub fn first_match(
    document: &Html,
    strategies: &[(&str, Strategy)],
) -> Result<Vec<Candidate>, AcquisitionError> {
    for (name, strategy) in strategies {
        let matches = strategy(document)?;
        if !matches.is_empty() {
            debug!(strategy = *name, count = matches.len(), "Selector strategy matched");
            return Ok(matches);
        }
    }
    Ok(Vec::new())
}

/// Locate candidate article links on a search results page.
///
/// The first [`MAX_CANDIDATES`] matches of the winning strategy are kept,
/// then anything whose href is not absolute `http(s)` is dropped.
#[instrument(level = "info", skip_all, fields(bytes = html.len()))]
pub fn parse_links(html: &str) -> Result<Vec<Candidate>, AcquisitionError> {
    let document = Html::parse_document(html);
    let candidates: Vec<Candidate> = first_match(&document, &STRATEGIES)?
        .into_iter()
        .take(MAX_CANDIDATES)
        .filter(|c| c.href.starts_with("http"))
        .collect();
    debug!(count = candidates.len(), "Parsed candidate links");
    Ok(candidates)
}
