use super::keyword::KeywordMatcher;
use super::model::{EmotionModel, SentimentMetrics};
use super::pipeline::EmotionClassificationPipeline;
use super::polarity::PolarityHeuristic;
use super::strategy::EmotionStrategy;
use super::transformer::TransformerStrategy;
use crate::core::{CascadeConfig, ModelCache};
use crate::models::{EmotionBagClassifier, EmotionBagOptions, LexiconSentiment};
use crate::pipelines::utils::{build_cache_key, DeviceRequest, DeviceSelectable};
use crate::translation::{HttpTranslator, TranslationStep, Translator};
use std::sync::Arc;

/// Builds the standard cascade: trained classifier, keywords, polarity.
///
/// Every collaborator is injected. Without a classifier the first step is
/// always unavailable; without a translator (or with translation disabled in
/// the config) input is classified as given.
pub struct EmotionClassificationPipelineBuilder {
    metrics: Arc<dyn SentimentMetrics>,
    classifier: Option<Arc<dyn EmotionModel>>,
    translator: Option<Arc<dyn Translator>>,
    http_translation: bool,
    keywords: Option<KeywordMatcher>,
    config: CascadeConfig,
    device_request: DeviceRequest,
}

impl EmotionClassificationPipelineBuilder {
    pub fn new(metrics: Arc<dyn SentimentMetrics>) -> Self {
        Self {
            metrics,
            classifier: None,
            translator: None,
            http_translation: false,
            keywords: None,
            config: CascadeConfig::default(),
            device_request: DeviceRequest::Auto,
        }
    }

    /// Builder using the built-in [`LexiconSentiment`] metrics.
    pub fn lexicon() -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(LexiconSentiment::new()?)))
    }

    pub fn config(mut self, config: CascadeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn classifier(mut self, model: Arc<dyn EmotionModel>) -> Self {
        self.classifier = Some(model);
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Translate through [`HttpTranslator`] at the configured endpoint.
    pub fn http_translator(mut self) -> Self {
        self.http_translation = true;
        self
    }

    /// Replace the keyword table from the config and the built-in one.
    pub fn keywords(mut self, matcher: KeywordMatcher) -> Self {
        self.keywords = Some(matcher);
        self
    }

    /// Load an [`EmotionBagClassifier`] from the Hub and use it as the
    /// trained classifier. Models already in `cache` are reused.
    pub async fn emotion_bag(
        mut self,
        options: EmotionBagOptions,
        cache: &ModelCache,
    ) -> anyhow::Result<Self> {
        let device = self.device_request.resolve()?;
        tracing::debug!(repo = %options.repo, ?device, "loading classifier onto device");
        let key = build_cache_key(&options, &device);
        let classifier = cache
            .get_or_load(&key, || EmotionBagClassifier::load(options, device.clone()))
            .await?;
        self.classifier = Some(Arc::new(classifier));
        Ok(self)
    }

    pub fn build(self) -> anyhow::Result<EmotionClassificationPipeline> {
        self.config.validate()?;

        let keywords = match self.keywords {
            Some(matcher) => matcher,
            None => match &self.config.keywords {
                Some(table) => KeywordMatcher::new(table)?,
                None => KeywordMatcher::builtin()?,
            },
        };

        let translator = match self.translator {
            Some(translator) => Some(translator),
            None if self.http_translation => Some(Arc::new(HttpTranslator::new(
                self.config.translation.endpoint.clone(),
            )) as Arc<dyn Translator>),
            None => None,
        };
        let translation = translator
            .filter(|_| self.config.translation.enabled)
            .map(|translator| TranslationStep::new(translator, &self.config.translation));

        let strategies: Vec<Box<dyn EmotionStrategy>> = vec![
            Box::new(TransformerStrategy::new(
                self.classifier,
                self.config.classifier.timeout(),
            )),
            Box::new(keywords),
            Box::new(PolarityHeuristic::new(
                self.metrics,
                self.config.polarity.neutral_score,
            )),
        ];

        Ok(EmotionClassificationPipeline::new(translation, strategies))
    }
}

impl DeviceSelectable for EmotionClassificationPipelineBuilder {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}
