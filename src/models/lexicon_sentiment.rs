//! Pattern-lexicon sentiment metrics.
//!
//! Each known word carries a polarity and a subjectivity. Intensifiers scale
//! the next word, negators flip and dampen the polarity of the next opinion
//! word within a short window. The text's metrics are the mean over opinion
//! words; text without any opinion word scores `(0.0, 0.0)`.

use crate::core::RawMetrics;
use crate::pipelines::emotion_classification_pipeline::SentimentMetrics;
use regex::Regex;
use std::collections::HashMap;

/// Polarity multiplier applied to a negated opinion word.
const NEGATION_FACTOR: f32 = -0.5;

/// How many tokens a negator reaches forward ("not a good idea").
const NEGATION_WINDOW: usize = 3;

const OPINION_WORDS: &[(&str, f32, f32)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("nice", 0.6, 1.0),
    ("fine", 0.4, 0.5),
    ("okay", 0.5, 0.5),
    ("ok", 0.5, 0.5),
    ("like", 0.2, 0.4),
    ("love", 0.5, 0.6),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("excellent", 1.0, 1.0),
    ("perfect", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("fun", 0.3, 0.2),
    ("exciting", 0.3, 0.8),
    ("interesting", 0.5, 0.5),
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("hate", -0.8, 0.9),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("stupid", -0.8, 1.0),
    ("annoyed", -0.4, 0.8),
    ("annoying", -0.8, 0.9),
    ("angry", -0.5, 1.0),
    ("boring", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("wrong", -0.5, 0.9),
    ("ugly", -0.7, 1.0),
    ("scary", -0.5, 1.0),
    ("crazy", -0.6, 0.9),
    ("weird", -0.5, 1.0),
    ("strange", -0.05, 0.15),
    ("serious", -0.33, 0.67),
    ("wild", 0.1, 0.4),
    ("intense", 0.15, 0.7),
    ("incredible", 0.9, 0.9),
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("so", 1.3),
    ("really", 1.3),
    ("too", 1.3),
    ("extremely", 1.5),
    ("absolutely", 1.5),
    ("incredibly", 1.5),
    ("totally", 1.4),
    ("quite", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.5),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "nobody", "hardly", "neither", "nor"];

/// Sentiment metrics from a built-in word lexicon. Cheap and deterministic.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    opinions: HashMap<String, (f32, f32)>,
    intensifiers: HashMap<String, f32>,
    tokens: Regex,
}

impl LexiconSentiment {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            opinions: OPINION_WORDS
                .iter()
                .map(|&(word, polarity, subjectivity)| (word.to_string(), (polarity, subjectivity)))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|&(word, factor)| (word.to_string(), factor))
                .collect(),
            tokens: Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)?")?,
        })
    }

    fn is_negator(token: &str) -> bool {
        NEGATORS.contains(&token) || token.ends_with("n't")
    }

    /// Compute `(polarity, subjectivity)` for `text`.
    pub fn metrics(&self, text: &str) -> RawMetrics {
        let lowered = text.to_lowercase();

        let mut contributions: Vec<(f32, f32)> = Vec::new();
        let mut intensity = 1.0_f32;
        let mut negation_left = 0_usize;

        for token in self.tokens.find_iter(&lowered).map(|m| m.as_str()) {
            if Self::is_negator(token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(&factor) = self.intensifiers.get(token) {
                intensity *= factor;
                continue;
            }

            if let Some(&(polarity, subjectivity)) = self.opinions.get(token) {
                let mut polarity = (polarity * intensity).clamp(-1.0, 1.0);
                let subjectivity = (subjectivity * intensity).clamp(0.0, 1.0);
                if negation_left > 0 {
                    polarity *= NEGATION_FACTOR;
                }
                contributions.push((polarity, subjectivity));
                negation_left = 0;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            intensity = 1.0;
        }

        if contributions.is_empty() {
            return RawMetrics::new(0.0, 0.0);
        }

        let n = contributions.len() as f32;
        let polarity = contributions.iter().map(|(p, _)| p).sum::<f32>() / n;
        let subjectivity = contributions.iter().map(|(_, s)| s).sum::<f32>() / n;
        RawMetrics::new(polarity, subjectivity).clamped()
    }
}

impl SentimentMetrics for LexiconSentiment {
    fn compute_metrics(&self, text: &str) -> anyhow::Result<RawMetrics> {
        Ok(self.metrics(text))
    }
}
