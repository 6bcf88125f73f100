pub mod emotion_bag;
pub mod lexicon_sentiment;

pub use emotion_bag::{EmotionBagClassifier, EmotionBagModel, EmotionBagOptions};
pub use lexicon_sentiment::LexiconSentiment;
