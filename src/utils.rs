//! Small text helpers shared across the pipeline.
//!
//! - Word counting used by the content filters
//! - Character-safe truncation for summaries and log previews
//! - Whitespace normalization for scraped text

/// Count whitespace-separated words.
///
/// This is the measure behind every length rule in the pipeline: the
/// fallback trigger in the resolver, the `> 10` filter in acquisition and
/// the `>= 50` summarization threshold.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep the first `max` characters of `text` and append `"..."`.
///
/// The cut is made on character boundaries, so multi-byte text never panics.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
/// assert_eq!(truncate_with_ellipsis("ab", 3), "ab...");
/// ```
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped characters appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", head, total - max)
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one two  three\nfour\tfive"), 5);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
        assert_eq!(truncate_with_ellipsis("ab", 3), "ab...");
        assert_eq!(truncate_with_ellipsis("", 3), "...");
    }

    #[test]
    fn test_truncate_with_ellipsis_multibyte() {
        let text = "समाचार समाचार";
        let out = truncate_with_ellipsis(text, 4);
        assert_eq!(out.chars().count(), 7);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 chars)"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\tc  "), "a b c");
    }
}
