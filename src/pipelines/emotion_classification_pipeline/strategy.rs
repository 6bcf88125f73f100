use crate::core::{ClassificationError, EmotionLabel, Method, RawMetrics};
use async_trait::async_trait;

/// What a strategy decided for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub emotion: EmotionLabel,
    /// Always within `[0, 1]`.
    pub score: f32,
    pub raw_metrics: Option<RawMetrics>,
}

impl Verdict {
    pub fn new(emotion: EmotionLabel, score: f32) -> Self {
        Self {
            emotion,
            score: score.clamp(0.0, 1.0),
            raw_metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: RawMetrics) -> Self {
        self.raw_metrics = Some(metrics);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    Produced(Verdict),
    /// The strategy could not or would not answer; the reason is only logged.
    Unavailable(String),
}

impl Attempt {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Attempt::Unavailable(reason.into())
    }
}

/// One step of the classification cascade.
///
/// Returning `Ok(Attempt::Unavailable(_))` moves the cascade to the next
/// strategy. Returning `Err` aborts the whole classification call, so only
/// failures with no possible fallback should do that.
#[async_trait]
pub trait EmotionStrategy: Send + Sync {
    fn method(&self) -> Method;

    async fn attempt(&self, text: &str) -> Result<Attempt, ClassificationError>;
}
