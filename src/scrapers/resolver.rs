//! Article content resolution.
//!
//! Structured extraction misses a lot of real-world layouts (paywalls,
//! script-rendered pages, odd markup), so a short result triggers a second
//! heuristic pass over the raw page. Resolution never fails: the worst case
//! is a record whose content is a sentinel string.

use crate::models::ArticleRecord;
use crate::scrapers::fallback::extract_fallback;
use crate::scrapers::fetch::PageFetcher;
use crate::scrapers::primary::ArticleExtractor;
use crate::utils::word_count;
use std::time::Duration;
use tracing::{debug, instrument};

/// Primary results with fewer words than this go through the fallback.
pub const FALLBACK_TRIGGER_WORDS: usize = 15;

/// Two-tier content resolver borrowing the extractors it orchestrates.
#[derive(Debug)]
pub struct ContentResolver<'a, E, F> {
    primary: &'a E,
    fetcher: &'a F,
    fallback_timeout: Duration,
}

impl<'a, E, F> ContentResolver<'a, E, F>
where
    E: ArticleExtractor,
    F: PageFetcher,
{
    pub fn new(primary: &'a E, fetcher: &'a F, fallback_timeout: Duration) -> Self {
        Self {
            primary,
            fetcher,
            fallback_timeout,
        }
    }

    /// Resolve one candidate link into a record with title, url and content.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn resolve(&self, url: &str, title: &str) -> ArticleRecord {
        let mut content = self.primary.extract_article(url).await;

        let words = word_count(&content);
        if words < FALLBACK_TRIGGER_WORDS {
            debug!(words, "Primary extraction too short; trying fallback");
            content = extract_fallback(self.fetcher, url, self.fallback_timeout).await;
        }

        debug!(words = word_count(&content), "Resolved article content");
        ArticleRecord::new(title, url, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcquisitionError;
    use crate::models::CONTENT_UNAVAILABLE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedExtractor(&'static str);

    impl ArticleExtractor for FixedExtractor {
        async fn extract_article(&self, _url: &str) -> String {
            self.0.to_string()
        }
    }

    struct CountingFetcher {
        body: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new(body: Option<&'static str>) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PageFetcher for CountingFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, AcquisitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .map(str::to_string)
                .ok_or_else(|| AcquisitionError::network(url, "timed out"))
        }
    }

    const LONG_TEXT: &str = "Acme reported record quarterly revenue on Tuesday as demand for its \
        industrial robots climbed across every region it serves worldwide.";

    #[tokio::test]
    async fn test_long_primary_skips_fallback() {
        let primary = FixedExtractor(LONG_TEXT);
        let fetcher = CountingFetcher::new(Some("<p>fallback</p>"));
        let resolver = ContentResolver::new(&primary, &fetcher, Duration::from_secs(5));

        let record = resolver.resolve("https://example.com/a", "Acme revenue").await;
        assert_eq!(record.content, LONG_TEXT);
        assert_eq!(record.title, "Acme revenue");
        assert_eq!(record.url, "https://example.com/a");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_short_primary_uses_fallback() {
        let primary = FixedExtractor("too short");
        let fetcher = CountingFetcher::new(Some("<p>Fallback paragraph one.</p><p>Two.</p>"));
        let resolver = ContentResolver::new(&primary, &fetcher, Duration::from_secs(5));

        let record = resolver.resolve("https://example.com/b", "Short").await;
        assert_eq!(record.content, "Fallback paragraph one. Two.");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_output_replaces_primary_even_if_shorter() {
        let primary = FixedExtractor("one two three");
        let fetcher = CountingFetcher::new(Some("<html><body></body></html>"));
        let resolver = ContentResolver::new(&primary, &fetcher, Duration::from_secs(5));

        let record = resolver.resolve("https://example.com/c", "Empty").await;
        assert_eq!(record.content, "");
    }

    #[tokio::test]
    async fn test_everything_failing_gives_sentinel() {
        let primary = FixedExtractor("");
        let fetcher = CountingFetcher::new(None);
        let resolver = ContentResolver::new(&primary, &fetcher, Duration::from_secs(5));

        let record = resolver.resolve("https://example.com/d", "Down").await;
        assert_eq!(record.content, CONTENT_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let primary = FixedExtractor("");
        let fetcher = CountingFetcher::new(Some("<p>Stable fallback body text.</p>"));
        let resolver = ContentResolver::new(&primary, &fetcher, Duration::from_secs(5));

        let first = resolver.resolve("https://example.com/e", "Same").await;
        let second = resolver.resolve("https://example.com/e", "Same").await;
        assert_eq!(first.content, second.content);
        assert_eq!(first, second);
    }
}
