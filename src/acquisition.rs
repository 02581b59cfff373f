//! Article acquisition: search, parse, resolve, filter, retry.
//!
//! One acquisition cycle walks through these states:
//!
//! ```text
//! Idle -> Querying -> Parsing -> Resolving -> Evaluating -> Done
//!            |           |                       |
//!            +-----------+-----> Retrying <------+
//! ```
//!
//! - **Querying**: fetch the search page (8 s timeout, rotated identity)
//! - **Parsing**: extract candidate links; zero candidates means retry
//! - **Resolving**: resolve every candidate, 4 at a time, in candidate order
//! - **Evaluating**: keep records with more than 10 words of content
//! - **Retrying**: wait a fixed backoff, then start over
//!
//! After the attempt bound (default 2) is used up, acquisition finishes with
//! a single placeholder record. Callers therefore always receive at least one
//! record and never an error.

use crate::error::AcquisitionError;
use crate::models::{ArticleRecord, FetchAttempt, SearchQuery};
use crate::scrapers::fallback::FALLBACK_TIMEOUT;
use crate::scrapers::fetch::PageFetcher;
use crate::scrapers::primary::ArticleExtractor;
use crate::scrapers::resolver::ContentResolver;
use crate::scrapers::results::parse_links;
use crate::utils::{truncate_for_log, word_count};
use futures::stream::{self, StreamExt};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Default number of full cycles before giving up.
pub const DEFAULT_ATTEMPTS: usize = 2;
/// Default pause between cycles.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
/// Timeout for the search results page.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);
/// Size of the worker pool used for fan-out.
pub const WORKER_POOL_SIZE: usize = 4;
/// Records need strictly more words than this to be kept.
pub const MIN_CONTENT_WORDS: usize = 10;

/// Stages of one acquisition run, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Idle,
    Querying,
    Parsing,
    Resolving,
    Evaluating,
    Retrying,
    Done,
}

/// Tunables for the acquisition loop.
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    /// Maximum number of query-fetch-parse-resolve cycles.
    pub attempts: usize,
    /// Fixed wait between cycles.
    pub backoff: Duration,
    pub search_timeout: Duration,
    pub fallback_timeout: Duration,
    /// Concurrent article resolutions per wave.
    pub workers: usize,
    pub min_words: usize,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            search_timeout: SEARCH_TIMEOUT,
            fallback_timeout: FALLBACK_TIMEOUT,
            workers: WORKER_POOL_SIZE,
            min_words: MIN_CONTENT_WORDS,
        }
    }
}

/// Drives the retry loop over a page fetcher and a structured extractor.
#[derive(Debug)]
pub struct Acquisition<F, E> {
    fetcher: F,
    extractor: E,
    config: AcquisitionConfig,
}

impl<F, E> Acquisition<F, E>
where
    F: PageFetcher,
    E: ArticleExtractor,
{
    pub fn new(fetcher: F, extractor: E, config: AcquisitionConfig) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    /// Acquire articles for `query`.
    ///
    /// # Returns
    ///
    /// The records that passed the content filter on the first successful
    /// cycle, in search result order, or a single
    /// [`ArticleRecord::placeholder`] if every cycle failed. An attempt bound
    /// of zero returns the placeholder without any network access.
    #[instrument(level = "info", skip_all, fields(query = %query.query_string()))]
    pub async fn acquire(&self, query: &SearchQuery) -> Vec<ArticleRecord> {
        let search_url = query.search_url();
        let max_attempts = self.config.attempts;
        let total_t0 = Instant::now();
        trace_state(AcquisitionState::Idle, 0);

        for attempt in 1..=max_attempts {
            let attempt_t0 = Instant::now();
            let outcome = self.run_cycle(&search_url, attempt).await;

            let record = FetchAttempt {
                attempt_number: attempt,
                success: outcome.is_ok(),
                article_count_found: outcome.as_ref().map(Vec::len).unwrap_or(0),
            };

            match outcome {
                Ok(records) => {
                    trace_state(AcquisitionState::Done, attempt);
                    info!(
                        attempt = record.attempt_number,
                        success = record.success,
                        count = record.article_count_found,
                        elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                        "Acquisition succeeded"
                    );
                    return records;
                }
                Err(e) => {
                    warn!(
                        attempt = record.attempt_number,
                        max = max_attempts,
                        success = record.success,
                        elapsed_ms_attempt = attempt_t0.elapsed().as_millis() as u64,
                        error = %e,
                        "Acquisition attempt failed"
                    );
                    if attempt < max_attempts {
                        trace_state(AcquisitionState::Retrying, attempt);
                        sleep(self.config.backoff).await;
                    }
                }
            }
        }

        trace_state(AcquisitionState::Done, max_attempts);
        warn!(
            attempts = max_attempts,
            elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
            "All acquisition attempts failed; returning placeholder"
        );
        vec![ArticleRecord::placeholder()]
    }

    /// One full query-fetch-parse-resolve-evaluate cycle.
    async fn run_cycle(
        &self,
        search_url: &str,
        attempt: usize,
    ) -> Result<Vec<ArticleRecord>, AcquisitionError> {
        trace_state(AcquisitionState::Querying, attempt);
        let html = self
            .fetcher
            .fetch(search_url, self.config.search_timeout)
            .await?;

        trace_state(AcquisitionState::Parsing, attempt);
        let candidates = parse_links(&html)?;
        if candidates.is_empty() {
            debug!(preview = %truncate_for_log(&html, 200), "No candidate links on results page");
            return Err(AcquisitionError::NoCandidates);
        }

        trace_state(AcquisitionState::Resolving, attempt);
        info!(count = candidates.len(), workers = self.config.workers, "Resolving candidates");
        let resolver = ContentResolver::new(&self.extractor, &self.fetcher, self.config.fallback_timeout);
        let resolver = &resolver;
        let resolved: Vec<ArticleRecord> = stream::iter(candidates)
            .map(|candidate| async move {
                resolver
                    .resolve(&candidate.href, &candidate.display_text)
                    .await
            })
            .buffered(self.config.workers.max(1))
            .collect()
            .await;

        trace_state(AcquisitionState::Evaluating, attempt);
        let resolved_count = resolved.len();
        let kept = keep_substantial(resolved, self.config.min_words);
        info!(resolved = resolved_count, kept = kept.len(), "Evaluated resolved articles");

        if kept.is_empty() {
            Err(AcquisitionError::NoUsableArticles)
        } else {
            Ok(kept)
        }
    }
}

/// Keep records whose content has strictly more than `min_words` words.
pub fn keep_substantial(records: Vec<ArticleRecord>, min_words: usize) -> Vec<ArticleRecord> {
    records
        .into_iter()
        .filter(|r| word_count(&r.content) > min_words)
        .collect()
}

fn trace_state(state: AcquisitionState, attempt: usize) {
    debug!(?state, attempt, "Acquisition state");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsSource, CONTENT_UNAVAILABLE, PLACEHOLDER_TITLE};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves scripted search pages in order, and article pages by URL.
    struct FakeWeb {
        search_pages: Vec<Option<String>>,
        articles: HashMap<String, String>,
        search_calls: AtomicUsize,
        article_calls: Mutex<Vec<String>>,
    }

    impl FakeWeb {
        fn new(search_pages: Vec<Option<String>>) -> Self {
            Self {
                search_pages,
                articles: HashMap::new(),
                search_calls: AtomicUsize::new(0),
                article_calls: Mutex::new(Vec::new()),
            }
        }

        fn with_article(mut self, url: &str, html: &str) -> Self {
            self.articles.insert(url.to_string(), html.to_string());
            self
        }

        fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    impl PageFetcher for FakeWeb {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, AcquisitionError> {
            if url.starts_with("https://www.bing.com/news/search") {
                let i = self.search_calls.fetch_add(1, Ordering::SeqCst);
                return self
                    .search_pages
                    .get(i)
                    .cloned()
                    .flatten()
                    .ok_or_else(|| AcquisitionError::network(url, "search unavailable"));
            }
            self.article_calls.lock().unwrap().push(url.to_string());
            self.articles
                .get(url)
                .cloned()
                .ok_or_else(|| AcquisitionError::network(url, "404"))
        }
    }

    /// Structured extractor that knows a fixed set of URLs.
    #[derive(Default)]
    struct FakeExtractor(HashMap<String, String>);

    impl FakeExtractor {
        fn with(mut self, url: &str, text: &str) -> Self {
            self.0.insert(url.to_string(), text.to_string());
            self
        }
    }

    impl ArticleExtractor for FakeExtractor {
        async fn extract_article(&self, url: &str) -> String {
            self.0.get(url).cloned().unwrap_or_default()
        }
    }

    fn fast_config() -> AcquisitionConfig {
        AcquisitionConfig {
            backoff: Duration::ZERO,
            ..AcquisitionConfig::default()
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::build("Acme", None, None, "", NewsSource::All)
    }

    fn results_page(links: &[(&str, &str)]) -> String {
        links
            .iter()
            .map(|(href, title)| format!(r#"<a class="title" href="{href}">{title}</a>"#))
            .collect()
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    #[tokio::test]
    async fn test_zero_results_every_attempt_yields_placeholder() {
        let web = FakeWeb::new(vec![
            Some("<html><body>nothing</body></html>".into()),
            Some("<html><body>still nothing</body></html>".into()),
        ]);
        let acquisition = Acquisition::new(web, FakeExtractor::default(), fast_config());

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, PLACEHOLDER_TITLE);
        assert_eq!(records[0].url, "");
        assert!(records[0].is_placeholder());
        assert_eq!(acquisition.fetcher.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_never_exceeds_attempt_bound() {
        let web = FakeWeb::new(vec![None, None, None, None, None]);
        let config = AcquisitionConfig {
            attempts: 3,
            ..fast_config()
        };
        let acquisition = Acquisition::new(web, FakeExtractor::default(), config);

        let records = acquisition.acquire(&query()).await;
        assert!(records[0].is_placeholder());
        assert_eq!(acquisition.fetcher.search_calls(), 3);
    }

    #[tokio::test]
    async fn test_network_failure_then_success() {
        let page = results_page(&[("https://news.example.com/1", "Acme grows")]);
        let web = FakeWeb::new(vec![None, Some(page)]);
        let extractor = FakeExtractor::default().with("https://news.example.com/1", &words(40));
        let acquisition = Acquisition::new(web, extractor, fast_config());

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Acme grows");
        assert_eq!(acquisition.fetcher.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_stops_loop() {
        let page = results_page(&[("https://news.example.com/1", "Acme grows")]);
        let web = FakeWeb::new(vec![Some(page.clone()), Some(page)]);
        let extractor = FakeExtractor::default().with("https://news.example.com/1", &words(40));
        let acquisition = Acquisition::new(web, extractor, fast_config());

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 1);
        assert_eq!(acquisition.fetcher.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_word_count_boundary() {
        let page = results_page(&[
            ("https://news.example.com/nine", "Nine words"),
            ("https://news.example.com/eleven", "Eleven words"),
        ]);
        let web = FakeWeb::new(vec![Some(page)])
            .with_article("https://news.example.com/nine", &format!("<p>{}</p>", words(9)))
            .with_article("https://news.example.com/eleven", &format!("<p>{}</p>", words(11)));
        let acquisition = Acquisition::new(web, FakeExtractor::default(), fast_config());

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Eleven words");
        assert_eq!(word_count(&records[0].content), 11);
    }

    #[test]
    fn test_ten_words_is_excluded() {
        let records = keep_substantial(
            vec![
                ArticleRecord::new("ten", "https://x", words(10)),
                ArticleRecord::new("eleven", "https://y", words(11)),
            ],
            MIN_CONTENT_WORDS,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "eleven");
    }

    #[tokio::test]
    async fn test_all_short_content_triggers_retry() {
        let page = results_page(&[("https://news.example.com/1", "Thin")]);
        let web = FakeWeb::new(vec![Some(page.clone()), Some(page)])
            .with_article("https://news.example.com/1", "<p>just a few words</p>");
        let acquisition = Acquisition::new(web, FakeExtractor::default(), fast_config());

        let records = acquisition.acquire(&query()).await;
        assert!(records[0].is_placeholder());
        assert_eq!(acquisition.fetcher.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_sentinel_content_is_filtered_out() {
        let page = results_page(&[
            ("https://news.example.com/down", "Down"),
            ("https://news.example.com/up", "Up"),
        ]);
        let web = FakeWeb::new(vec![Some(page)]);
        let extractor = FakeExtractor::default().with("https://news.example.com/up", &words(30));
        let acquisition = Acquisition::new(web, extractor, fast_config());

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Up");
        assert!(records.iter().all(|r| r.content != CONTENT_UNAVAILABLE));
        let calls = acquisition.fetcher.article_calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["https://news.example.com/down".to_string()]);
    }

    #[tokio::test]
    async fn test_records_keep_search_order() {
        let links: Vec<(String, String)> = (0..9)
            .map(|i| (format!("https://news.example.com/{i}"), format!("Story {i}")))
            .collect();
        let link_refs: Vec<(&str, &str)> = links.iter().map(|(h, t)| (h.as_str(), t.as_str())).collect();
        let page = results_page(&link_refs);

        let extractor = links
            .iter()
            .fold(FakeExtractor::default(), |ex, (href, _)| ex.with(href, &words(20)));
        let web = FakeWeb::new(vec![Some(page)]);
        let acquisition = Acquisition::new(web, extractor, fast_config());

        let records = acquisition.acquire(&query()).await;
        let titles: Vec<_> = records.iter().map(|r| r.title.clone()).collect();
        let expected: Vec<_> = (0..9).map(|i| format!("Story {i}")).collect();
        assert_eq!(titles, expected);
    }

    /// Extractor that tracks how many calls are in flight at once.
    #[derive(Default)]
    struct GaugedExtractor {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ArticleExtractor for GaugedExtractor {
        async fn extract_article(&self, _url: &str) -> String {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            words(20)
        }
    }

    #[tokio::test]
    async fn test_resolution_concurrency_is_bounded_by_workers() {
        let links: Vec<(String, String)> = (0..12)
            .map(|i| (format!("https://news.example.com/{i}"), format!("Story {i}")))
            .collect();
        let link_refs: Vec<(&str, &str)> = links.iter().map(|(h, t)| (h.as_str(), t.as_str())).collect();
        let web = FakeWeb::new(vec![Some(results_page(&link_refs))]);
        let config = AcquisitionConfig {
            workers: 4,
            ..fast_config()
        };
        let acquisition = Acquisition::new(web, GaugedExtractor::default(), config);

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 12);
        let peak = acquisition.extractor.peak.load(Ordering::SeqCst);
        assert!(peak <= 4, "peak in-flight resolutions was {peak}");
        assert!(peak > 1, "resolutions never overlapped");
    }

    #[tokio::test]
    async fn test_zero_attempts_skips_search() {
        let page = results_page(&[("https://news.example.com/1", "Acme grows")]);
        let web = FakeWeb::new(vec![Some(page)]);
        let extractor = FakeExtractor::default().with("https://news.example.com/1", &words(40));
        let config = AcquisitionConfig {
            attempts: 0,
            ..fast_config()
        };
        let acquisition = Acquisition::new(web, extractor, config);

        let records = acquisition.acquire(&query()).await;
        assert_eq!(records.len(), 1);
        assert!(records[0].is_placeholder());
        assert_eq!(acquisition.fetcher.search_calls(), 0);
    }
}
