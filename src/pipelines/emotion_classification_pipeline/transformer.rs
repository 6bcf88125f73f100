//! Adapter that turns a trained [`EmotionModel`] into a cascade strategy.

use super::model::EmotionModel;
use super::strategy::{Attempt, EmotionStrategy, Verdict};
use crate::core::{ClassificationError, EmotionLabel, Method};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Labels a trained emotion model may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLabel {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Neutral,
}

impl ModelLabel {
    /// Parse a model label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "joy" => Some(ModelLabel::Joy),
            "sadness" => Some(ModelLabel::Sadness),
            "anger" => Some(ModelLabel::Anger),
            "fear" => Some(ModelLabel::Fear),
            "disgust" => Some(ModelLabel::Disgust),
            "surprise" => Some(ModelLabel::Surprise),
            "neutral" => Some(ModelLabel::Neutral),
            _ => None,
        }
    }

    pub fn to_palette(self) -> EmotionLabel {
        match self {
            ModelLabel::Joy => EmotionLabel::Joy,
            ModelLabel::Sadness => EmotionLabel::Sadness,
            ModelLabel::Anger | ModelLabel::Disgust => EmotionLabel::Anger,
            ModelLabel::Fear => EmotionLabel::Fear,
            ModelLabel::Surprise => EmotionLabel::Energy,
            ModelLabel::Neutral => EmotionLabel::Neutral,
        }
    }
}

/// Pick the most confident prediction and map it onto the palette.
///
/// Unknown labels and non-finite confidences are skipped; among equal
/// confidences the earlier prediction wins.
pub fn reconcile_predictions(predictions: &[(String, f32)]) -> Option<(EmotionLabel, f32)> {
    predictions
        .iter()
        .filter(|(_, confidence)| confidence.is_finite())
        .filter_map(|(label, confidence)| {
            ModelLabel::parse(label).map(|label| (label.to_palette(), *confidence))
        })
        .fold(None, |best: Option<(EmotionLabel, f32)>, candidate| match best {
            Some((_, top)) if top >= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(emotion, confidence)| (emotion, confidence.clamp(0.0, 1.0)))
}

/// Cascade step backed by an optional trained classifier.
///
/// Every failure mode (no model, inference error, panic, timeout, nothing
/// recognizable in the output) makes the strategy unavailable.
#[derive(Clone)]
pub struct TransformerStrategy {
    model: Option<Arc<dyn EmotionModel>>,
    timeout: Duration,
}

impl TransformerStrategy {
    pub fn new(model: Option<Arc<dyn EmotionModel>>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }
}

#[async_trait]
impl EmotionStrategy for TransformerStrategy {
    fn method(&self) -> Method {
        Method::AiTransformer
    }

    async fn attempt(&self, text: &str) -> Result<Attempt, ClassificationError> {
        let Some(model) = &self.model else {
            return Ok(Attempt::unavailable("no classifier loaded"));
        };

        let model = Arc::clone(model);
        let input = text.to_owned();
        let inference = tokio::task::spawn_blocking(move || model.predict(&input));

        let predictions = match tokio::time::timeout(self.timeout, inference).await {
            Ok(Ok(Ok(predictions))) => predictions,
            Ok(Ok(Err(e))) => {
                tracing::warn!(error = %e, "emotion classifier failed");
                return Ok(Attempt::unavailable(format!("classifier error: {e}")));
            }
            Ok(Err(join_error)) => {
                tracing::warn!(error = %join_error, "emotion classifier task aborted");
                return Ok(Attempt::unavailable("classifier task aborted"));
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "emotion classifier timed out");
                return Ok(Attempt::unavailable("classifier timed out"));
            }
        };

        Ok(match reconcile_predictions(&predictions) {
            Some((emotion, score)) => Attempt::Produced(Verdict::new(emotion, score)),
            None => Attempt::unavailable("classifier returned no known label"),
        })
    }
}
