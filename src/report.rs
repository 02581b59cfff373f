//! Comparative analysis over a processed record set.
//!
//! Turns enriched records into what the presentation layer shows: the
//! intensity-filtered and sorted article list, the sentiment distribution,
//! the dominant sentiment, common headline keywords and the sentence that
//! is read out in the audio summary.

use crate::models::{ArticleRecord, Sentiment};
use clap::ValueEnum;
use itertools::Itertools;
use serde::Serialize;

/// Ordering of articles in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    /// Search result order.
    #[default]
    Relevance,
    /// Highest compound score first.
    Sentiment,
}

/// Inclusive compound-score window used to filter articles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for IntensityBounds {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0 }
    }
}

impl IntensityBounds {
    /// Records without a score are always kept.
    pub fn contains(&self, record: &ArticleRecord) -> bool {
        record
            .compound
            .is_none_or(|c| self.min <= c && c <= self.max)
    }
}

/// Count of articles per label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn from_records(records: &[ArticleRecord]) -> Self {
        let mut dist = Self::default();
        for sentiment in records.iter().filter_map(|r| r.sentiment) {
            match sentiment {
                Sentiment::Positive => dist.positive += 1,
                Sentiment::Negative => dist.negative += 1,
                Sentiment::Neutral => dist.neutral += 1,
            }
        }
        dist
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Most frequent label; ties go to the earlier label in
    /// Positive, Negative, Neutral order. `None` when there are no articles.
    pub fn dominant(&self) -> Option<Sentiment> {
        if self.total() == 0 {
            return None;
        }
        let mut best = Sentiment::ALL[0];
        for sentiment in Sentiment::ALL {
            if self.count(sentiment) > self.count(best) {
                best = sentiment;
            }
        }
        Some(best)
    }

    /// One-line verdict over the distribution.
    pub fn conclusion(&self) -> &'static str {
        if self.positive > self.negative {
            "mostly positive"
        } else {
            "mixed or negative"
        }
    }
}

/// Everything the presentation layer renders for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub company: String,
    pub articles: Vec<ArticleRecord>,
    pub distribution: SentimentDistribution,
    pub dominant_sentiment: Option<Sentiment>,
    pub conclusion: String,
    pub common_keywords: Vec<String>,
}

impl Report {
    /// Filter, sort and summarize `records` for `company`.
    pub fn build(
        company: &str,
        records: Vec<ArticleRecord>,
        bounds: IntensityBounds,
        sort: SortOrder,
    ) -> Self {
        let mut articles: Vec<ArticleRecord> =
            records.into_iter().filter(|r| bounds.contains(r)).collect();

        if sort == SortOrder::Sentiment {
            articles.sort_by(|a, b| {
                b.compound
                    .unwrap_or(0.0)
                    .total_cmp(&a.compound.unwrap_or(0.0))
            });
        }

        let distribution = SentimentDistribution::from_records(&articles);
        Self {
            company: company.to_string(),
            dominant_sentiment: distribution.dominant(),
            conclusion: distribution.conclusion().to_string(),
            common_keywords: headline_keywords(&articles),
            distribution,
            articles,
        }
    }

    /// Sentence read out in the audio summary, if there is anything to say.
    pub fn audio_sentence(&self) -> Option<String> {
        self.dominant_sentiment.map(|s| audio_sentence(&self.company, s))
    }

    /// Distribution as label/count pairs in display order.
    pub fn distribution_rows(&self) -> Vec<(&'static str, usize)> {
        Sentiment::ALL
            .into_iter()
            .map(|s| (s.as_str(), self.distribution.count(s)))
            .collect()
    }
}

/// The fixed spoken template.
pub fn audio_sentence(company: &str, sentiment: Sentiment) -> String {
    format!("{company} ke news coverage ke anusar overall sentiment {sentiment} hai.")
}

/// First two words of each headline, de-duplicated in first-seen order.
pub fn headline_keywords(records: &[ArticleRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.title.split_whitespace().take(2))
        .unique()
        .map(str::to_string)
        .collect()
}
