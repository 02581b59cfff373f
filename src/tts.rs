//! Spoken summary synthesis.
//!
//! [`GoogleTts`] speaks text through the public Google Translate speech
//! endpoint. The endpoint accepts short inputs only, so the text is split
//! into chunks of at most [`MAX_CHUNK_CHARS`] characters on word boundaries
//! and the returned MP3 segments are concatenated.

use crate::error::TtsError;
use crate::scrapers::identity::next_user_agent;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Speech endpoint.
pub const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";
/// Longest chunk the endpoint accepts.
pub const MAX_CHUNK_CHARS: usize = 100;

const TTS_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns text into playable audio bytes.
pub trait SpeechSynthesizer {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError>;
}

/// [`SpeechSynthesizer`] backed by Google Translate.
#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: Client,
}

impl GoogleTts {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(TTS_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

impl SpeechSynthesizer for GoogleTts {
    #[instrument(level = "info", skip_all, fields(%lang, chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let bytes = self
                .client
                .get(TTS_ENDPOINT)
                .header(USER_AGENT, next_user_agent())
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang),
                    ("q", chunk.as_str()),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            debug!(chunk = %idx, bytes = bytes.len(), "Synthesized chunk");
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }
        info!(bytes = audio.len(), "Synthesized speech");
        Ok(audio)
    }
}

/// Split `text` into chunks of at most `max` characters, breaking between
/// words. A single word longer than `max` is split mid-word.
pub fn chunk_text(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: &str = word;
        while word.chars().count() > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            chunks.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
