//! Hugging Face Hub loaders for the trained emotion classifier.
//!
//! - [`HfLoader`] - Generic Hub file loader with retry logic
//! - [`TokenizerLoader`] - Loads `tokenizer.json`
//! - [`ClassifierConfigLoader`] - Loads the label map and head dimensions from `config.json`
//! - [`SafetensorsLoader`] - Resolves the model weights file
//!
//! All loaders retry when the Hub cache reports lock contention, which happens
//! when several pipelines download the same repository at once.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub async fn load(&self) -> anyhow::Result<PathBuf> {
        let hf_api = hf_hub::api::tokio::ApiBuilder::new()
            .with_chunk_size(None)
            .build()?;
        let hf_api = hf_api.model(self.repo.clone());

        let max_retries = 3;
        let mut attempt = 0;

        loop {
            match hf_api.get(self.filename.as_str()).await {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let lock_contention = e.to_string().contains("Lock acquisition failed");
                    if lock_contention && attempt < max_retries - 1 {
                        let wait_time = std::time::Duration::from_millis(100 * (1 << attempt));
                        tracing::debug!(
                            repo = %self.repo,
                            file = %self.filename,
                            ?wait_time,
                            "hub cache locked, retrying"
                        );
                        tokio::time::sleep(wait_time).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(anyhow::anyhow!(
                        "failed to fetch {} from {}: {e}",
                        self.filename,
                        self.repo
                    ));
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, filename),
        }
    }

    pub async fn load(&self) -> anyhow::Result<Tokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load().await?;
        Tokenizer::from_file(tokenizer_file_path).map_err(anyhow::Error::msg)
    }
}

/// The subset of a classifier `config.json` the emotion model needs.
#[derive(Debug, Clone, Deserialize)]
pub struct HubClassifierConfig {
    pub id2label: HashMap<String, String>,
    pub vocab_size: usize,
    pub hidden_size: usize,
}

impl HubClassifierConfig {
    /// Labels ordered by class index.
    ///
    /// Fails if the ids are not exactly `0..n`, since the head's output rows
    /// would otherwise not line up with the labels.
    pub fn ordered_labels(&self) -> anyhow::Result<Vec<String>> {
        let mut labels = vec![None; self.id2label.len()];
        for (id, label) in &self.id2label {
            let index: usize = id
                .parse()
                .map_err(|_| anyhow::anyhow!("id2label key '{id}' is not an integer"))?;
            let slot = labels
                .get_mut(index)
                .ok_or_else(|| anyhow::anyhow!("id2label index {index} is out of range"))?;
            *slot = Some(label.clone());
        }
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| label.ok_or_else(|| anyhow::anyhow!("id2label is missing index {i}")))
            .collect()
    }
}

pub struct ClassifierConfigLoader {
    pub config_file_loader: HfLoader,
}

impl ClassifierConfigLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            config_file_loader: HfLoader::new(repo, filename),
        }
    }

    pub async fn load(&self) -> anyhow::Result<HubClassifierConfig> {
        let config_file_path = self.config_file_loader.load().await?;
        let content = std::fs::read_to_string(&config_file_path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {:?}: {}", config_file_path, e)
        })?;
        let config: HubClassifierConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse classifier config: {}", e))?;
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct SafetensorsLoader {
    pub weights_file_loader: HfLoader,
}

impl SafetensorsLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            weights_file_loader: HfLoader::new(repo, filename),
        }
    }

    pub async fn load(&self) -> anyhow::Result<PathBuf> {
        let path = self.weights_file_loader.load().await?;
        if path.extension().map_or(true, |ext| ext != "safetensors") {
            anyhow::bail!("Unsupported weight file format: {:?}", path);
        }
        Ok(path)
    }
}
