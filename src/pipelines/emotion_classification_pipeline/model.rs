use crate::core::RawMetrics;

/// A trained multi-class emotion classifier.
///
/// Labels are model-native (`joy`, `sadness`, `anger`, `fear`, `disgust`,
/// `surprise`, `neutral`); mapping onto the palette happens in the cascade.
/// `predict` runs on the blocking thread pool, so it may be CPU heavy.
pub trait EmotionModel: Send + Sync {
    /// Label confidences for `text`, in any order.
    fn predict(&self, text: &str) -> anyhow::Result<Vec<(String, f32)>>;
}

/// Provider of the polarity/subjectivity pair behind the polarity heuristic.
pub trait SentimentMetrics: Send + Sync {
    fn compute_metrics(&self, text: &str) -> anyhow::Result<RawMetrics>;
}
