//! Extractive summarization.
//!
//! [`FrequencySummarizer`] scores each sentence by how many of the text's
//! most frequent content words it contains and keeps the best few, in their
//! original order. [`summarize_content`] wraps any [`Summarizer`] with the
//! length rules used for article cards.

use crate::error::SummarizeError;
use crate::utils::{truncate_with_ellipsis, word_count};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Number of sentences kept in a summary.
pub const SUMMARY_SENTENCES: usize = 3;
/// Texts shorter than this are truncated instead of summarized.
pub const MIN_WORDS_FOR_SUMMARY: usize = 50;
/// Character budget for short texts.
pub const SHORT_TEXT_CHARS: usize = 250;
/// Character budget when the summarizer fails.
pub const FALLBACK_CHARS: usize = 300;

pub const SUMMARY_NOT_AVAILABLE: &str = "Summary not available.";

static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^.!?]+(?:[.!?]+["'’”)\]]*|$)"#).expect("valid sentence regex"));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be",
        "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has",
        "have", "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "it's", "more",
        "most", "not", "of", "on", "one", "or", "our", "out", "over", "said", "says", "she",
        "so", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
        "those", "to", "up", "was", "we", "were", "what", "when", "which", "who", "will",
        "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Produces a shorter version of a text.
pub trait Summarizer: Send + Sync {
    /// Return at most `sentences` sentences drawn from `text`.
    fn summarize(&self, text: &str, sentences: usize) -> Result<String, SummarizeError>;
}

/// Word-frequency extractive summarizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencySummarizer;

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str, sentences: usize) -> Result<String, SummarizeError> {
        let all: Vec<&str> = split_sentences(text);
        if all.is_empty() {
            return Err(SummarizeError::NoSentences);
        }
        if all.len() <= sentences {
            return Ok(all.join(" "));
        }

        let frequencies = content_word_frequencies(text);
        let max = frequencies.values().copied().max().unwrap_or(1) as f64;

        let picked = all
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let words: Vec<String> = content_words(sentence).collect();
                let score = if words.is_empty() {
                    0.0
                } else {
                    words
                        .iter()
                        .map(|w| *frequencies.get(w).unwrap_or(&0) as f64 / max)
                        .sum::<f64>()
                        / words.len() as f64
                };
                (index, score)
            })
            .sorted_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)))
            .take(sentences)
            .map(|(index, _)| index)
            .sorted()
            .map(|index| all[index])
            .join(" ");

        Ok(picked)
    }
}

/// Apply the card summary rules to `text`.
///
/// - empty text: [`SUMMARY_NOT_AVAILABLE`]
/// - fewer than [`MIN_WORDS_FOR_SUMMARY`] words: first 250 characters + `...`
/// - otherwise up to [`SUMMARY_SENTENCES`] extracted sentences, or the first
///   300 characters + `...` if the summarizer faults
pub fn summarize_content<S: Summarizer + ?Sized>(summarizer: &S, text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return SUMMARY_NOT_AVAILABLE.to_string();
    }
    if word_count(trimmed) < MIN_WORDS_FOR_SUMMARY {
        return truncate_with_ellipsis(trimmed, SHORT_TEXT_CHARS);
    }
    match summarizer.summarize(text, SUMMARY_SENTENCES) {
        Ok(summary) if !summary.trim().is_empty() => summary,
        Ok(_) => truncate_with_ellipsis(text, FALLBACK_CHARS),
        Err(e) => {
            tracing::debug!(error = %e, "Summarizer failed; truncating");
            truncate_with_ellipsis(text, FALLBACK_CHARS)
        }
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

fn content_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t.as_str()))
}

fn content_word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in content_words(text) {
        *frequencies.entry(word).or_insert(0) += 1;
    }
    frequencies
}
