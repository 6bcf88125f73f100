use super::{Translation, Translator};
use crate::core::config::DEFAULT_TRANSLATION_ENDPOINT;
use async_trait::async_trait;
use serde_json::Value;

/// Translator speaking the `translate_a/single` JSON protocol.
///
/// The response is a nested array: element 0 holds the translated segments
/// (each segment's first entry is a chunk of output text) and element 2 holds
/// the detected source language.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for HttpTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSLATION_ENDPOINT)
    }
}

impl HttpTranslator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Use a preconfigured client (proxy, user agent, connection pool).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn parse_response(body: &Value) -> anyhow::Result<Translation> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow::anyhow!("translation response has no segment list"))?;

        let text: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();
        if text.trim().is_empty() {
            anyhow::bail!("translation response contained no text");
        }

        let source_language = body.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(Translation {
            text,
            source_language,
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> anyhow::Result<Translation> {
        let url = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        let body: Value = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Self::parse_response(&body)
    }
}
