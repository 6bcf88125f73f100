//! Emotion classification pipeline for short texts.
//!
//! Input is first translated to English when a translator is configured, then
//! handed to a cascade of strategies until one of them answers:
//!
//! 1. a trained emotion classifier ([`EmotionModel`]), when one is loaded
//! 2. whole-word keyword matching ([`KeywordMatcher`])
//! 3. a polarity/subjectivity heuristic ([`PolarityHeuristic`]), which always answers
//!
//! ## Main Types
//!
//! - [`EmotionClassificationPipeline`] - Runs translation and the cascade
//! - [`EmotionClassificationPipelineBuilder`] - Assembles the standard cascade
//! - [`EmotionStrategy`] - One step of the cascade
//! - [`EmotionDistribution`] - Emotion counts over a batch of results
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use emotia::pipelines::emotion_classification_pipeline::*;
//!
//! # tokio_test::block_on(async {
//! let pipeline = EmotionClassificationPipelineBuilder::lexicon()?.build()?;
//!
//! let result = pipeline.classify("I am so scared of the dark.").await?;
//! println!("{} ({:.2}) via {}", result.emotion, result.score, result.method);
//! # anyhow::Ok(())
//! # });
//! ```

pub mod builder;
pub mod distribution;
pub mod keyword;
pub mod model;
pub mod pipeline;
pub mod polarity;
pub mod strategy;
pub mod transformer;

pub use builder::EmotionClassificationPipelineBuilder;
pub use distribution::EmotionDistribution;
pub use keyword::{default_keywords, KeywordMatch, KeywordMatcher};
pub use model::{EmotionModel, SentimentMetrics};
pub use pipeline::EmotionClassificationPipeline;
pub use polarity::{emotion_for_metrics, PolarityHeuristic};
pub use strategy::{Attempt, EmotionStrategy, Verdict};
pub use transformer::{reconcile_predictions, ModelLabel, TransformerStrategy};

pub use crate::core::{ClassificationError, ClassificationResult, EmotionLabel, Method, RawMetrics};
pub use crate::pipelines::utils::DeviceSelectable;
