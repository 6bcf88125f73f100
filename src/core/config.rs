//! Cascade configuration.
//!
//! Everything here has a working default, so an empty JSON object `{}` is a
//! valid configuration. Load from disk with [`CascadeConfig::from_file`].

use super::emotion::EmotionLabel;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://translate.googleapis.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub target_language: String,
    pub timeout_ms: u64,
    /// Trimmed inputs shorter than this are never sent to the translator.
    pub min_chars: usize,
    pub endpoint: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_language: "en".to_string(),
            timeout_ms: 3_000,
            min_chars: 3,
            endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub timeout_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarityConfig {
    /// Score reported when the heuristic falls through to `neutral`.
    pub neutral_score: f32,
}

impl Default for PolarityConfig {
    fn default() -> Self {
        Self { neutral_score: 0.2 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub translation: TranslationConfig,
    pub classifier: ClassifierConfig,
    pub polarity: PolarityConfig,
    /// Replaces the built-in keyword table when present.
    pub keywords: Option<BTreeMap<EmotionLabel, Vec<String>>>,
}

impl CascadeConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: CascadeConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let score = self.polarity.neutral_score;
        if !(0.0..=1.0).contains(&score) {
            return Err(ConfigError::Invalid {
                field: "polarity.neutral_score",
                reason: format!("{score} is outside [0, 1]"),
            });
        }
        if self.translation.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "translation.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.classifier.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "classifier.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.translation.target_language.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "translation.target_language",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
