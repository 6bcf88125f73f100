use crate::core::ModelOptions;
use crate::loaders::{ClassifierConfigLoader, SafetensorsLoader, TokenizerLoader};
use crate::pipelines::emotion_classification_pipeline::EmotionModel;
use anyhow::{Error as E, Result};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Embedding, Linear, Module, VarBuilder};
use tokenizers::Tokenizer;

/// Where to fetch an emotion bag model from.
///
/// The repository must contain `config.json` (with `id2label`, `vocab_size`
/// and `hidden_size`), `model.safetensors` and `tokenizer.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmotionBagOptions {
    pub repo: String,
}

impl EmotionBagOptions {
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into() }
    }
}

impl ModelOptions for EmotionBagOptions {
    fn cache_key(&self) -> String {
        format!("emotion-bag-{}", self.repo)
    }
}

/// Bag-of-embeddings emotion classifier.
///
/// Token embeddings are mean-pooled and fed through one linear layer; the
/// softmax over its output gives one probability per model label.
#[derive(Clone)]
pub struct EmotionBagModel {
    embeddings: Embedding,
    classifier: Linear,
    labels: Vec<String>,
    device: Device,
}

impl EmotionBagModel {
    /// Build the model from weights named `embeddings.weight`,
    /// `classifier.weight` and `classifier.bias`.
    pub fn from_var_builder(
        vb: VarBuilder,
        vocab_size: usize,
        hidden_size: usize,
        labels: Vec<String>,
    ) -> Result<Self> {
        if labels.is_empty() {
            anyhow::bail!("emotion model needs at least one label");
        }
        let device = vb.device().clone();
        let embeddings = candle_nn::embedding(vocab_size, hidden_size, vb.pp("embeddings"))?;
        let classifier = candle_nn::linear(hidden_size, labels.len(), vb.pp("classifier"))?;
        Ok(Self {
            embeddings,
            classifier,
            labels,
            device,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Label probabilities for already tokenized input, highest first.
    pub fn predict_ids(&self, token_ids: &[u32]) -> Result<Vec<(String, f32)>> {
        if token_ids.is_empty() {
            anyhow::bail!("cannot classify an empty token sequence");
        }

        let input_ids = Tensor::new(token_ids, &self.device)?.unsqueeze(0)?;
        let pooled = self.embeddings.forward(&input_ids)?.mean(1)?;
        let logits = self.classifier.forward(&pooled)?;
        let probabilities = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        let mut ranked: Vec<(String, f32)> = self
            .labels
            .iter()
            .cloned()
            .zip(probabilities)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked)
    }
}

/// An [`EmotionBagModel`] paired with its tokenizer.
#[derive(Clone)]
pub struct EmotionBagClassifier {
    model: EmotionBagModel,
    tokenizer: Tokenizer,
}

impl EmotionBagClassifier {
    pub fn new(model: EmotionBagModel, tokenizer: Tokenizer) -> Self {
        Self { model, tokenizer }
    }

    /// Download (or reuse from the Hub cache) and load the model.
    pub async fn load(options: EmotionBagOptions, device: Device) -> Result<Self> {
        let repo = options.repo.as_str();
        tracing::info!(repo, "loading emotion classifier");

        let config = ClassifierConfigLoader::new(repo, "config.json").load().await?;
        let labels = config.ordered_labels()?;
        let weights = SafetensorsLoader::new(repo, "model.safetensors").load().await?;
        let tokenizer = TokenizerLoader::new(repo, "tokenizer.json").load().await?;

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, &device)? };
        let model = EmotionBagModel::from_var_builder(vb, config.vocab_size, config.hidden_size, labels)?;

        Ok(Self::new(model, tokenizer))
    }

    pub fn model(&self) -> &EmotionBagModel {
        &self.model
    }
}

impl EmotionModel for EmotionBagClassifier {
    fn predict(&self, text: &str) -> Result<Vec<(String, f32)>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| E::msg(format!("Tokenization error: {}", e)))?;
        self.model.predict_ids(encoding.get_ids())
    }
}
