pub mod core;
mod loaders;
pub mod models;
pub mod pipelines;
pub mod translation;

// Re-export core types
pub use core::{
    CascadeConfig, ClassificationError, ClassificationResult, ConfigError, EmotionLabel, Method,
    ModelCache, RawMetrics,
};

// Re-export the pipeline entry points for easier access
pub use pipelines::emotion_classification_pipeline::{
    EmotionClassificationPipeline, EmotionClassificationPipelineBuilder, EmotionDistribution,
};
