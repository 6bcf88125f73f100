pub mod cache;
pub mod config;
pub mod emotion;
pub mod error;

pub use cache::{ModelCache, ModelOptions};
pub use config::{CascadeConfig, ClassifierConfig, PolarityConfig, TranslationConfig};
pub use emotion::{ClassificationResult, EmotionLabel, Method, RawMetrics};
pub use error::{ClassificationError, ConfigError};
