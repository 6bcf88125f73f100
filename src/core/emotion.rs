//! Emotion palette and the unified classification result.
//!
//! Every strategy in the cascade reports through these types, so downstream
//! collaborators (HTTP handlers, report generators) only ever see one shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed palette of emotions the classifier can output.
///
/// Declaration order is the palette order. Keyword ties are broken in this
/// order, so reordering variants changes classification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Joy,
    Sadness,
    Anger,
    Fear,
    Energy,
    Neutral,
}

impl EmotionLabel {
    /// All labels in palette order.
    pub const PALETTE: [EmotionLabel; 6] = [
        EmotionLabel::Joy,
        EmotionLabel::Sadness,
        EmotionLabel::Anger,
        EmotionLabel::Fear,
        EmotionLabel::Energy,
        EmotionLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Joy => "joy",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Energy => "energy",
            EmotionLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionLabel::PALETTE
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown emotion label '{s}'"))
    }
}

/// The strategy that terminated the cascade for a given result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    AiTransformer,
    Keyword,
    Sentiment,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::AiTransformer => "ai_transformer",
            Method::Keyword => "keyword",
            Method::Sentiment => "sentiment",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity and subjectivity as computed by a sentiment metrics provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    /// Negative-to-positive sentiment in `[-1, 1]`.
    pub polarity: f32,
    /// Objective-to-subjective tone in `[0, 1]`.
    pub subjectivity: f32,
}

impl RawMetrics {
    pub fn new(polarity: f32, subjectivity: f32) -> Self {
        Self {
            polarity,
            subjectivity,
        }
    }

    /// Clamp both metrics into their documented ranges.
    pub fn clamped(self) -> Self {
        Self {
            polarity: self.polarity.clamp(-1.0, 1.0),
            subjectivity: self.subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Input exactly as received.
    pub original_text: String,
    /// Text the strategies actually saw (post-translation if applied).
    pub processing_text: String,
    pub emotion: EmotionLabel,
    /// Confidence in `[0, 1]`, higher is more confident.
    pub score: f32,
    pub method: Method,
    pub is_translated: bool,
    pub translated_text: Option<String>,
    /// Source language reported by the translator, if it reported one.
    pub detected_language: Option<String>,
    /// Present only when the polarity heuristic produced the result.
    pub raw_metrics: Option<RawMetrics>,
}
