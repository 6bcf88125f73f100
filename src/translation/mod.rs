//! Best-effort translation before classification.
//!
//! A [`Translator`] does the actual work and may fail in any way it likes.
//! [`TranslationStep`] wraps it with the cascade's policy: skip very short
//! input, bound the wait, and fall back to the untouched text on any failure.

mod http;

pub use http::HttpTranslator;

use crate::core::TranslationConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Text returned by a translation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Detected source language code, when the provider reports one.
    pub source_language: Option<String>,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> anyhow::Result<Translation>;
}

/// Result of the translation step as seen by the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// The text downstream strategies should classify.
    pub text: String,
    pub was_translated: bool,
    pub source_language: Option<String>,
}

impl TranslationOutcome {
    pub fn untouched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            was_translated: false,
            source_language: None,
        }
    }
}

#[derive(Clone)]
pub struct TranslationStep {
    translator: Arc<dyn Translator>,
    target_language: String,
    timeout: Duration,
    min_chars: usize,
}

impl TranslationStep {
    pub fn new(translator: Arc<dyn Translator>, config: &TranslationConfig) -> Self {
        Self {
            translator,
            target_language: config.target_language.clone(),
            timeout: config.timeout(),
            min_chars: config.min_chars,
        }
    }

    /// Translate `text` to the target language. Never fails.
    pub async fn translate(&self, text: &str) -> TranslationOutcome {
        if text.trim().chars().count() < self.min_chars {
            return TranslationOutcome::untouched(text);
        }

        let call = self.translator.translate(text, &self.target_language);
        let translation = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(translation)) => translation,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "translation failed, classifying original text");
                return TranslationOutcome::untouched(text);
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "translation timed out, classifying original text");
                return TranslationOutcome::untouched(text);
            }
        };

        let already_target = translation
            .source_language
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(&self.target_language));
        let translated = translation.text.trim();
        let changed = !translated.is_empty() && translated != text.trim();

        if changed && !already_target {
            tracing::debug!(source = ?translation.source_language, "translated input");
            TranslationOutcome {
                text: translated.to_string(),
                was_translated: true,
                source_language: translation.source_language,
            }
        } else {
            TranslationOutcome {
                text: text.to_string(),
                was_translated: false,
                source_language: translation.source_language,
            }
        }
    }
}
