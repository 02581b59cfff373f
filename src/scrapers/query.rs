//! Search query construction.
//!
//! The query is the company name followed, in this order, by the keyword
//! filter, a `site:` restriction and an `after:/before:` date range. The
//! assembled query is URL-encoded into the news search endpoint.

use crate::models::{NewsSource, SearchQuery};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// News search endpoint. `{query}` is replaced with the encoded query.
pub const SEARCH_ENDPOINT: &str = "https://www.bing.com/news/search?q={query}&FORM=HDRSC6";

const DATE_FORMAT: &str = "%Y-%m-%d";

impl SearchQuery {
    /// Assemble a query from the user's filters.
    ///
    /// # Arguments
    ///
    /// * `company` - The company term, used verbatim
    /// * `start_date` / `end_date` - ISO dates; the range clause is only
    ///   emitted when both are present and both parse
    /// * `keywords` - Appended verbatim after a space when non-empty
    /// * `source` - Anything other than [`NewsSource::All`] becomes a
    ///   `site:` restriction
    pub fn build(
        company: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        keywords: &str,
        source: NewsSource,
    ) -> Self {
        let keyword_term = if keywords.is_empty() {
            String::new()
        } else {
            format!(" {keywords}")
        };

        let site_restriction = site_restriction(source.display_name())
            .map(|site| format!(" site:{site}"))
            .unwrap_or_default();

        let date_range_clause = match (start_date, end_date) {
            (Some(start), Some(end)) => date_range(start, end).unwrap_or_default(),
            _ => String::new(),
        };

        let query = Self {
            company_term: company.to_string(),
            keyword_term,
            site_restriction,
            date_range_clause,
        };
        debug!(query = %query.query_string(), "Built search query");
        query
    }

    /// The full query text.
    pub fn query_string(&self) -> String {
        format!(
            "{}{}{}{}",
            self.company_term, self.keyword_term, self.site_restriction, self.date_range_clause
        )
    }

    /// The search endpoint with the encoded query embedded.
    pub fn search_url(&self) -> String {
        SEARCH_ENDPOINT.replace("{query}", &urlencoding::encode(&self.query_string()))
    }
}

/// Map a source name to a bare domain: lower-cased, spaces removed, `.com`.
///
/// Returns `None` for `"All"`.
pub fn site_restriction(source_name: &str) -> Option<String> {
    if source_name == "All" {
        return None;
    }
    Some(format!("{}.com", source_name.to_lowercase().replace(' ', "")))
}

/// Render ` after:<start> before:<end>` when both dates parse.
fn date_range(start: &str, end: &str) -> Option<String> {
    let parse = |raw: &str| match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(value = raw, error = %e, "Ignoring unparsable date; date range omitted");
            None
        }
    };
    let start = parse(start)?;
    let end = parse(end)?;
    Some(format!(
        " after:{} before:{}",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    ))
}
