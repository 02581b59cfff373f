//! Lexicon-based sentiment scoring.
//!
//! A compact valence lexicon in the style of VADER, tuned toward business
//! news vocabulary. Each token contributes its valence, adjusted by nearby
//! negators and boosters; clauses after "but" weigh more than those before
//! it. The summed valence is squashed into a compound score in `[-1, 1]`.
//!
//! The lexicon is built once per process and shared read-only, so a single
//! [`LexiconScorer`] can serve every worker at once.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;
/// Multiplier applied to a valence preceded by a negator.
const NEGATION_SCALAR: f64 = -0.74;
/// Intensity added by a booster word directly before a sentiment word.
const BOOSTER_INCREMENT: f64 = 0.293;
/// How many preceding tokens are checked for negators and boosters.
const LOOKBACK: usize = 3;

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("good", 1.9), ("great", 3.1), ("excellent", 2.7), ("positive", 2.6), ("strong", 2.3),
        ("stronger", 2.0), ("growth", 1.6), ("grow", 1.4), ("grows", 1.4), ("growing", 1.4),
        ("gain", 2.0), ("gains", 2.0), ("gained", 1.8), ("profit", 1.9), ("profits", 1.9),
        ("profitable", 2.1), ("record", 1.0), ("success", 2.7), ("successful", 2.8),
        ("win", 2.8), ("wins", 2.7), ("won", 2.7), ("beat", 1.2), ("beats", 1.2),
        ("surge", 1.8), ("surged", 1.8), ("soar", 2.0), ("soared", 2.0), ("rally", 1.6),
        ("rallied", 1.6), ("boost", 1.7), ("boosted", 1.7), ("upgrade", 1.6),
        ("upgraded", 1.6), ("improve", 1.9), ("improved", 2.1), ("improvement", 2.0),
        ("innovative", 2.2), ("innovation", 1.9), ("optimistic", 2.3), ("optimism", 2.5),
        ("confident", 2.2), ("confidence", 2.3), ("benefit", 2.0), ("benefits", 2.0),
        ("opportunity", 1.8), ("opportunities", 1.8), ("approve", 1.8), ("approved", 1.8),
        ("expand", 1.3), ("expanded", 1.3), ("expansion", 1.3), ("launch", 0.8),
        ("partnership", 1.5), ("best", 3.2), ("better", 1.9), ("happy", 2.7),
        ("love", 3.2), ("like", 1.5), ("leading", 1.6), ("robust", 1.8), ("healthy", 1.7),
        ("recover", 1.6), ("recovery", 1.6), ("rebound", 1.5), ("upbeat", 2.0),
        ("praise", 2.6), ("praised", 2.6), ("reward", 2.1), ("secure", 1.4),
        ("stable", 1.2), ("outperform", 2.0), ("bullish", 2.0), ("dividend", 0.9),
        // negative
        ("bad", -2.5), ("poor", -2.1), ("weak", -1.9), ("weaker", -1.9), ("loss", -1.3),
        ("losses", -1.7), ("lose", -1.7), ("lost", -1.3), ("decline", -1.5),
        ("declined", -1.5), ("declines", -1.5), ("drop", -1.1), ("dropped", -1.2),
        ("fall", -1.3), ("fell", -1.3), ("falls", -1.3), ("plunge", -2.2),
        ("plunged", -2.2), ("slump", -2.0), ("slumped", -2.0), ("crash", -2.4),
        ("crisis", -3.1), ("lawsuit", -1.8), ("sued", -1.9), ("sue", -1.8),
        ("fraud", -3.0), ("scandal", -2.8), ("investigation", -1.1), ("probe", -1.0),
        ("fine", 0.8), ("fined", -1.6), ("penalty", -1.8), ("layoff", -1.9),
        ("layoffs", -2.0), ("cut", -1.1), ("cuts", -1.1), ("fired", -2.6),
        ("bankrupt", -2.6), ("bankruptcy", -2.6), ("debt", -1.5), ("risk", -1.1),
        ("risks", -1.1), ("risky", -1.4), ("concern", -1.3), ("concerns", -1.3),
        ("worried", -1.8), ("worry", -1.9), ("fear", -2.2), ("fears", -2.2),
        ("uncertain", -1.4), ("uncertainty", -1.4), ("downgrade", -1.6),
        ("downgraded", -1.6), ("miss", -1.0), ("missed", -1.2), ("fail", -2.5),
        ("failed", -2.3), ("failure", -2.3), ("problem", -1.7), ("problems", -1.7),
        ("recall", -1.0), ("warning", -1.4), ("warns", -1.4), ("threat", -2.4),
        ("hurt", -2.4), ("damage", -2.2), ("struggle", -2.0), ("struggling", -2.0),
        ("bearish", -2.0), ("volatile", -1.2), ("angry", -2.3), ("worst", -3.1),
        ("worse", -2.1), ("terrible", -2.5), ("negative", -2.7), ("breach", -1.9),
        ("hack", -1.6), ("strike", -1.1), ("shortage", -1.5), ("delay", -1.3),
        ("delayed", -1.3),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.0), ("extremely", 1.0), ("highly", 1.0), ("sharply", 1.0),
        ("significantly", 1.0), ("substantially", 1.0), ("hugely", 1.0), ("really", 1.0),
        ("strongly", 1.0), ("most", 1.0), ("deeply", 1.0), ("slightly", -1.0),
        ("somewhat", -1.0), ("marginally", -1.0), ("barely", -1.0), ("little", -1.0),
    ]
    .into_iter()
    .collect()
});

const NEGATORS: [&str; 14] = [
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without",
    "isn't", "wasn't", "aren't", "won't", "can't",
];

/// Maps a text to a compound polarity score.
pub trait SentimentScorer: Send + Sync {
    /// Compound score in `[-1, 1]`.
    fn compound(&self, text: &str) -> f64;
}

/// Stateless scorer over the shared lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Lazy::force(&LEXICON);
        Lazy::force(&BOOSTERS);
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = LEXICON.get(token.as_str()) else {
                valences.push(0.0);
                continue;
            };

            let mut valence = base;
            for k in 1..=LOOKBACK.min(i) {
                if let Some(&direction) = BOOSTERS.get(tokens[i - k].as_str()) {
                    let decay = 1.0 - 0.05 * (k as f64 - 1.0);
                    valence += BOOSTER_INCREMENT * direction * decay * valence.signum();
                }
            }
            let negated = (1..=LOOKBACK.min(i)).any(|k| is_negator(&tokens[i - k]));
            if negated {
                valence *= NEGATION_SCALAR;
            }
            valences.push(valence);
        }

        if let Some(pivot) = tokens.iter().position(|t| t == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        normalize(valences.iter().sum())
    }
}

/// Squash an unbounded valence sum into `[-1, 1]`.
fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

/// Lower-cased word tokens, keeping in-word apostrophes.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '’')
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '’').replace('’', "'").to_lowercase())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    #[test]
    fn test_positive_text() {
        let scorer = LexiconScorer::new();
        let text = "Acme posted record profits and strong growth, beating expectations.";
        assert!(scorer.compound(text) >= 0.05);
        assert_eq!(Sentiment::from_compound(scorer.compound(text)), Sentiment::Positive);
    }

    #[test]
    fn test_negative_text() {
        let scorer = LexiconScorer::new();
        let text = "Acme faces a fraud lawsuit and announced layoffs after heavy losses.";
        assert!(scorer.compound(text) <= -0.05);
        assert_eq!(Sentiment::from_compound(scorer.compound(text)), Sentiment::Negative);
    }

    #[test]
    fn test_neutral_text() {
        let scorer = LexiconScorer::new();
        let text = "Acme will hold its annual meeting in Chicago on Thursday.";
        assert_eq!(scorer.compound(text), 0.0);
        assert_eq!(Sentiment::from_compound(scorer.compound(text)), Sentiment::Neutral);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.compound("The quarter was good.") > 0.0);
        assert!(scorer.compound("The quarter was not good.") < 0.0);
        assert!(scorer.compound("The quarter wasn't good.") < 0.0);
    }

    #[test]
    fn test_booster_increases_intensity() {
        let scorer = LexiconScorer::new();
        let plain = scorer.compound("Results were good.");
        let boosted = scorer.compound("Results were very good.");
        assert!(boosted > plain);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let scorer = LexiconScorer::new();
        let score = scorer.compound("Revenue was good but the outlook is terrible.");
        assert!(score < 0.0);
    }

    #[test]
    fn test_compound_is_bounded() {
        let scorer = LexiconScorer::new();
        let gushing = "great ".repeat(200);
        let gloomy = "crisis ".repeat(200);
        assert!(scorer.compound(&gushing) <= 1.0);
        assert!(scorer.compound(&gloomy) >= -1.0);
        assert!(scorer.compound(&gushing) > 0.9);
        assert!(scorer.compound(&gloomy) < -0.9);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.compound(""), 0.0);
        assert_eq!(Sentiment::from_compound(scorer.compound("")), Sentiment::Neutral);
    }

    #[test]
    fn test_tokenize_keeps_contractions() {
        let tokens: Vec<String> = tokenize("It wasn’t GOOD, 'really'.").collect();
        assert_eq!(tokens, vec!["it", "wasn't", "good", "really"]);
    }
}
