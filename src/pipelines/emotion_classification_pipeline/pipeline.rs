use super::strategy::{Attempt, EmotionStrategy};
use crate::core::{ClassificationError, ClassificationResult, Method};
use crate::translation::{TranslationOutcome, TranslationStep};

/// Runs the translation step and then the strategy cascade.
///
/// Strategies are tried in order; the first one that produces a verdict ends
/// the call. The pipeline holds only read-only state and can be shared across
/// tasks behind an `Arc`.
pub struct EmotionClassificationPipeline {
    pub(crate) translation: Option<TranslationStep>,
    pub(crate) strategies: Vec<Box<dyn EmotionStrategy>>,
}

impl EmotionClassificationPipeline {
    /// Assemble a pipeline from an explicit strategy order.
    pub fn new(
        translation: Option<TranslationStep>,
        strategies: Vec<Box<dyn EmotionStrategy>>,
    ) -> Self {
        Self {
            translation,
            strategies,
        }
    }

    /// Strategy order, for diagnostics.
    pub fn methods(&self) -> Vec<Method> {
        self.strategies.iter().map(|s| s.method()).collect()
    }

    pub fn translates(&self) -> bool {
        self.translation.is_some()
    }

    /// Classify one text.
    ///
    /// Rejecting empty or whitespace-only input is the caller's job.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassificationError> {
        let translation = match &self.translation {
            Some(step) => step.translate(text).await,
            None => TranslationOutcome::untouched(text),
        };

        for strategy in &self.strategies {
            let method = strategy.method();
            match strategy.attempt(&translation.text).await? {
                Attempt::Produced(verdict) => {
                    tracing::debug!(%method, emotion = %verdict.emotion, score = verdict.score, "classified");
                    return Ok(ClassificationResult {
                        original_text: text.to_string(),
                        processing_text: translation.text.clone(),
                        emotion: verdict.emotion,
                        score: verdict.score,
                        method,
                        is_translated: translation.was_translated,
                        translated_text: translation
                            .was_translated
                            .then(|| translation.text.clone()),
                        detected_language: translation.source_language.clone(),
                        raw_metrics: verdict.raw_metrics,
                    });
                }
                Attempt::Unavailable(reason) => {
                    tracing::debug!(%method, %reason, "strategy unavailable, falling through");
                }
            }
        }

        Err(ClassificationError::NoStrategyAvailable)
    }

    /// Classify every non-blank line of `text`, in order.
    ///
    /// Lines are trimmed before classification, so each result's
    /// `original_text` is the trimmed line rather than the raw input. The
    /// first fatal error aborts the batch.
    pub async fn classify_lines(
        &self,
        text: &str,
    ) -> Result<Vec<ClassificationResult>, ClassificationError> {
        let mut results = Vec::new();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            results.push(self.classify(line).await?);
        }
        Ok(results)
    }
}
