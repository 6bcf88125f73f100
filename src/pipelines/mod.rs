pub mod emotion_classification_pipeline;
pub mod utils;
