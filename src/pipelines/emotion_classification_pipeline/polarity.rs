//! Last-resort classification from polarity and subjectivity.

use super::model::SentimentMetrics;
use super::strategy::{Attempt, EmotionStrategy, Verdict};
use crate::core::{ClassificationError, EmotionLabel, Method, RawMetrics};
use async_trait::async_trait;
use std::sync::Arc;

const POLARITY_THRESHOLD: f32 = 0.3;
const SUBJECTIVITY_THRESHOLD: f32 = 0.6;

/// Map sentiment metrics to an emotion and a score. First matching rule wins:
///
/// 1. polarity > 0.3 gives joy scored by polarity
/// 2. polarity < -0.3 gives sadness scored by |polarity|
/// 3. subjectivity > 0.6 with negative polarity gives anger
/// 4. subjectivity > 0.6 otherwise gives energy
/// 5. anything else is neutral with `neutral_score`
///
/// Rules 3 and 4 are scored by subjectivity.
pub fn emotion_for_metrics(metrics: RawMetrics, neutral_score: f32) -> (EmotionLabel, f32) {
    let RawMetrics {
        polarity,
        subjectivity,
    } = metrics;

    let (emotion, score) = if polarity > POLARITY_THRESHOLD {
        (EmotionLabel::Joy, polarity)
    } else if polarity < -POLARITY_THRESHOLD {
        (EmotionLabel::Sadness, polarity.abs())
    } else if subjectivity > SUBJECTIVITY_THRESHOLD && polarity < 0.0 {
        (EmotionLabel::Anger, subjectivity)
    } else if subjectivity > SUBJECTIVITY_THRESHOLD {
        (EmotionLabel::Energy, subjectivity)
    } else {
        (EmotionLabel::Neutral, neutral_score)
    };

    (emotion, score.clamp(0.0, 1.0))
}

/// Polarity heuristic backed by a [`SentimentMetrics`] provider.
#[derive(Clone)]
pub struct PolarityHeuristic {
    metrics: Arc<dyn SentimentMetrics>,
    neutral_score: f32,
}

impl PolarityHeuristic {
    pub fn new(metrics: Arc<dyn SentimentMetrics>, neutral_score: f32) -> Self {
        Self {
            metrics,
            neutral_score: neutral_score.clamp(0.0, 1.0),
        }
    }

    /// Classify `text`. Fails only when the metrics cannot be computed.
    pub fn classify(&self, text: &str) -> Result<Verdict, ClassificationError> {
        let metrics = self
            .metrics
            .compute_metrics(text)
            .map_err(ClassificationError::Metrics)?;

        if !metrics.polarity.is_finite() || !metrics.subjectivity.is_finite() {
            return Err(ClassificationError::Metrics(anyhow::anyhow!(
                "provider returned non-finite metrics {metrics:?}"
            )));
        }

        let metrics = metrics.clamped();
        let (emotion, score) = emotion_for_metrics(metrics, self.neutral_score);
        Ok(Verdict::new(emotion, score).with_metrics(metrics))
    }
}

#[async_trait]
impl EmotionStrategy for PolarityHeuristic {
    fn method(&self) -> Method {
        Method::Sentiment
    }

    async fn attempt(&self, text: &str) -> Result<Attempt, ClassificationError> {
        self.classify(text).map(Attempt::Produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(polarity: f32, subjectivity: f32) -> (EmotionLabel, f32) {
        emotion_for_metrics(RawMetrics::new(polarity, subjectivity), 0.2)
    }

    #[test]
    fn decision_table() {
        assert_eq!(decide(0.5, 0.1), (EmotionLabel::Joy, 0.5));
        assert_eq!(decide(-0.5, 0.1), (EmotionLabel::Sadness, 0.5));
        assert_eq!(decide(-0.1, 0.7), (EmotionLabel::Anger, 0.7));
        assert_eq!(decide(0.1, 0.7), (EmotionLabel::Energy, 0.7));
        assert_eq!(decide(0.0, 0.7), (EmotionLabel::Energy, 0.7));
        assert_eq!(decide(0.0, 0.2), (EmotionLabel::Neutral, 0.2));
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(decide(0.3, 0.0).0, EmotionLabel::Neutral);
        assert_eq!(decide(-0.3, 0.0).0, EmotionLabel::Neutral);
        assert_eq!(decide(0.1, 0.6).0, EmotionLabel::Neutral);
    }

    #[test]
    fn polarity_rules_take_precedence_over_subjectivity() {
        assert_eq!(decide(0.9, 1.0), (EmotionLabel::Joy, 0.9));
        assert_eq!(decide(-0.8, 1.0), (EmotionLabel::Sadness, 0.8));
    }

    struct Fixed(RawMetrics);

    impl SentimentMetrics for Fixed {
        fn compute_metrics(&self, _text: &str) -> anyhow::Result<RawMetrics> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl SentimentMetrics for Broken {
        fn compute_metrics(&self, _text: &str) -> anyhow::Result<RawMetrics> {
            anyhow::bail!("sentiment backend offline")
        }
    }

    #[test]
    fn reports_metrics_with_the_verdict() {
        let heuristic = PolarityHeuristic::new(Arc::new(Fixed(RawMetrics::new(-0.6, 0.4))), 0.2);
        let verdict = heuristic.classify("anything").unwrap();
        assert_eq!(verdict.emotion, EmotionLabel::Sadness);
        assert_eq!(verdict.raw_metrics, Some(RawMetrics::new(-0.6, 0.4)));
    }

    #[test]
    fn metric_failures_are_fatal() {
        let heuristic = PolarityHeuristic::new(Arc::new(Broken), 0.2);
        let err = heuristic.classify("anything").unwrap_err();
        assert!(matches!(err, ClassificationError::Metrics(_)));
    }

    #[test]
    fn non_finite_metrics_are_rejected() {
        let heuristic = PolarityHeuristic::new(Arc::new(Fixed(RawMetrics::new(f32::NAN, 0.1))), 0.2);
        assert!(heuristic.classify("anything").is_err());
    }
}
