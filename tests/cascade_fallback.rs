// Integration tests for the emotion classification cascade
// This is a separate crate that tests the public API

use async_trait::async_trait;
use emotia::pipelines::emotion_classification_pipeline::*;
use emotia::translation::{Translation, Translator};
use emotia::CascadeConfig;
use std::sync::Arc;

struct FixedMetrics(RawMetrics);

impl SentimentMetrics for FixedMetrics {
    fn compute_metrics(&self, _text: &str) -> anyhow::Result<RawMetrics> {
        Ok(self.0)
    }
}

struct BrokenMetrics;

impl SentimentMetrics for BrokenMetrics {
    fn compute_metrics(&self, _text: &str) -> anyhow::Result<RawMetrics> {
        anyhow::bail!("sentiment backend offline")
    }
}

struct FailingModel;

impl EmotionModel for FailingModel {
    fn predict(&self, _text: &str) -> anyhow::Result<Vec<(String, f32)>> {
        anyhow::bail!("CUDA out of memory")
    }
}

struct FixedModel(Vec<(String, f32)>);

impl FixedModel {
    fn top(label: &str, confidence: f32) -> Self {
        Self(vec![
            ("neutral".to_string(), 1.0 - confidence),
            (label.to_string(), confidence),
        ])
    }
}

impl EmotionModel for FixedModel {
    fn predict(&self, _text: &str) -> anyhow::Result<Vec<(String, f32)>> {
        Ok(self.0.clone())
    }
}

/// Translates one known Spanish sentence and claims everything else is English.
struct PhrasebookTranslator;

#[async_trait]
impl Translator for PhrasebookTranslator {
    async fn translate(&self, text: &str, _target: &str) -> anyhow::Result<Translation> {
        Ok(match text {
            "Estoy muy triste" => Translation {
                text: "I am very sad".to_string(),
                source_language: Some("es".to_string()),
            },
            other => Translation {
                text: other.to_string(),
                source_language: Some("en".to_string()),
            },
        })
    }
}

fn with_metrics(polarity: f32, subjectivity: f32) -> EmotionClassificationPipelineBuilder {
    EmotionClassificationPipelineBuilder::new(Arc::new(FixedMetrics(RawMetrics::new(
        polarity,
        subjectivity,
    ))))
}

const NO_KEYWORDS: &str = "The report is on the desk.";

#[tokio::test]
async fn single_emotion_keywords_win() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0).build()?;

    for (text, expected) in [
        ("I am so scared of the dark.", EmotionLabel::Fear),
        ("This makes me so mad!", EmotionLabel::Anger),
        ("I am heartbroken.", EmotionLabel::Sadness),
        ("I love this wonderful day.", EmotionLabel::Joy),
        ("Wow, I'm so pumped!", EmotionLabel::Energy),
    ] {
        let result = pipeline.classify(text).await?;
        assert_eq!(result.emotion, expected, "{text}");
        assert_eq!(result.method, Method::Keyword);
        assert!([0.8_f32, 0.9, 1.0]
            .iter()
            .any(|s| (s - result.score).abs() < 1e-6));
        assert_eq!(result.raw_metrics, None);
    }
    Ok(())
}

#[tokio::test]
async fn substrings_do_not_trigger_keywords() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0).build()?;
    let result = pipeline.classify("I made it to the station.").await?;
    assert_eq!(result.method, Method::Sentiment);
    assert_eq!(result.emotion, EmotionLabel::Neutral);
    Ok(())
}

#[tokio::test]
async fn polarity_decides_without_keywords() -> anyhow::Result<()> {
    let cases = [
        ((0.5, 0.1), EmotionLabel::Joy, 0.5),
        ((-0.5, 0.1), EmotionLabel::Sadness, 0.5),
        ((0.0, 0.7), EmotionLabel::Energy, 0.7),
        ((-0.2, 0.9), EmotionLabel::Anger, 0.9),
        ((0.0, 0.2), EmotionLabel::Neutral, 0.2),
    ];

    for ((polarity, subjectivity), emotion, score) in cases {
        let pipeline = with_metrics(polarity, subjectivity).build()?;
        let result = pipeline.classify(NO_KEYWORDS).await?;
        assert_eq!(result.emotion, emotion, "polarity {polarity}, subjectivity {subjectivity}");
        assert!((result.score - score).abs() < 1e-6);
        assert_eq!(result.method, Method::Sentiment);
        assert_eq!(
            result.raw_metrics,
            Some(RawMetrics::new(polarity, subjectivity))
        );
    }
    Ok(())
}

#[tokio::test]
async fn neutral_score_follows_config() -> anyhow::Result<()> {
    let config = CascadeConfig::from_json_str(r#"{"polarity": {"neutral_score": 0.3}}"#)?;
    let pipeline = with_metrics(0.0, 0.2).config(config).build()?;
    let result = pipeline.classify(NO_KEYWORDS).await?;
    assert_eq!(result.emotion, EmotionLabel::Neutral);
    assert!((result.score - 0.3).abs() < 1e-6);
    Ok(())
}

#[tokio::test]
async fn classification_is_idempotent() -> anyhow::Result<()> {
    let pipeline = EmotionClassificationPipelineBuilder::lexicon()?.build()?;
    for text in ["This is absolutely wonderful!", NO_KEYWORDS, "I hate this stupid thing."] {
        let first = pipeline.classify(text).await?;
        let second = pipeline.classify(text).await?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[tokio::test]
async fn failing_classifier_falls_through_to_keywords() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0)
        .classifier(Arc::new(FailingModel))
        .build()?;
    let result = pipeline.classify("I hate this stupid thing.").await?;
    assert_eq!(result.method, Method::Keyword);
    assert_eq!(result.emotion, EmotionLabel::Anger);
    Ok(())
}

#[tokio::test]
async fn failing_classifier_and_no_keywords_reach_polarity() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.6, 0.5)
        .classifier(Arc::new(FailingModel))
        .build()?;
    let result = pipeline.classify(NO_KEYWORDS).await?;
    assert_eq!(result.method, Method::Sentiment);
    assert_eq!(result.emotion, EmotionLabel::Joy);
    Ok(())
}

#[tokio::test]
async fn classifier_labels_are_remapped() -> anyhow::Result<()> {
    for (model_label, emotion) in [
        ("disgust", EmotionLabel::Anger),
        ("surprise", EmotionLabel::Energy),
        ("fear", EmotionLabel::Fear),
    ] {
        let pipeline = with_metrics(0.0, 0.0)
            .classifier(Arc::new(FixedModel::top(model_label, 0.8)))
            .build()?;
        // Keywords point elsewhere; the classifier runs first.
        let result = pipeline.classify("I am so happy").await?;
        assert_eq!(result.method, Method::AiTransformer);
        assert_eq!(result.emotion, emotion);
        assert!((result.score - 0.8).abs() < 1e-6);
    }
    Ok(())
}

#[tokio::test]
async fn classifier_with_unknown_labels_is_skipped() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0)
        .classifier(Arc::new(FixedModel(vec![("LABEL_0".to_string(), 0.99)])))
        .build()?;
    let result = pipeline.classify("I am so happy").await?;
    assert_eq!(result.method, Method::Keyword);
    assert_eq!(result.emotion, EmotionLabel::Joy);
    Ok(())
}

#[tokio::test]
async fn metric_failure_is_fatal() -> anyhow::Result<()> {
    let pipeline = EmotionClassificationPipelineBuilder::new(Arc::new(BrokenMetrics)).build()?;
    let err = pipeline.classify(NO_KEYWORDS).await.unwrap_err();
    assert!(matches!(err, ClassificationError::Metrics(_)));
    Ok(())
}

#[tokio::test]
async fn metric_failure_is_irrelevant_when_keywords_answer() -> anyhow::Result<()> {
    let pipeline = EmotionClassificationPipelineBuilder::new(Arc::new(BrokenMetrics)).build()?;
    let result = pipeline.classify("I am terrified").await?;
    assert_eq!(result.emotion, EmotionLabel::Fear);
    Ok(())
}

#[tokio::test]
async fn translation_keeps_original_text() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0)
        .translator(Arc::new(PhrasebookTranslator))
        .build()?;

    let result = pipeline.classify("Estoy muy triste").await?;
    assert_eq!(result.original_text, "Estoy muy triste");
    assert_eq!(result.processing_text, "I am very sad");
    assert!(result.is_translated);
    assert_eq!(result.translated_text.as_deref(), Some("I am very sad"));
    assert_eq!(result.detected_language.as_deref(), Some("es"));
    assert_eq!(result.emotion, EmotionLabel::Sadness);
    assert_eq!(result.method, Method::Keyword);

    let english = pipeline.classify("I am happy today.").await?;
    assert_eq!(english.original_text, "I am happy today.");
    assert!(!english.is_translated);
    assert_eq!(english.translated_text, None);
    Ok(())
}

#[tokio::test]
async fn translation_can_be_disabled_by_config() -> anyhow::Result<()> {
    let config = CascadeConfig::from_json_str(r#"{"translation": {"enabled": false}}"#)?;
    let pipeline = with_metrics(0.0, 0.0)
        .translator(Arc::new(PhrasebookTranslator))
        .config(config)
        .build()?;
    assert!(!pipeline.translates());

    let result = pipeline.classify("Estoy muy triste").await?;
    assert!(!result.is_translated);
    assert_eq!(result.processing_text, "Estoy muy triste");
    Ok(())
}

#[tokio::test]
async fn keyword_table_comes_from_config() -> anyhow::Result<()> {
    let config =
        CascadeConfig::from_json_str(r#"{"keywords": {"fear": ["spooky"], "joy": ["sunny"]}}"#)?;
    let pipeline = with_metrics(0.0, 0.0).config(config).build()?;

    let result = pipeline.classify("A spooky night").await?;
    assert_eq!(result.emotion, EmotionLabel::Fear);

    // The built-in table is replaced, not extended.
    let result = pipeline.classify("I am terrified").await?;
    assert_eq!(result.method, Method::Sentiment);
    Ok(())
}

#[tokio::test]
async fn cascade_order_is_fixed() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0).build()?;
    assert_eq!(
        pipeline.methods(),
        vec![Method::AiTransformer, Method::Keyword, Method::Sentiment]
    );
    Ok(())
}

#[tokio::test]
async fn custom_cascades_can_run_dry() -> anyhow::Result<()> {
    let matcher = KeywordMatcher::builtin()?;
    let pipeline = EmotionClassificationPipeline::new(None, vec![Box::new(matcher)]);
    let err = pipeline.classify(NO_KEYWORDS).await.unwrap_err();
    assert!(matches!(err, ClassificationError::NoStrategyAvailable));
    Ok(())
}

#[tokio::test]
async fn classifies_each_line() -> anyhow::Result<()> {
    let pipeline = with_metrics(0.0, 0.0).build()?;
    let results = pipeline
        .classify_lines("I am happy today.\n\n   \nI am terrified\n  This makes me mad  ")
        .await?;

    let emotions: Vec<_> = results.iter().map(|r| r.emotion).collect();
    assert_eq!(
        emotions,
        vec![EmotionLabel::Joy, EmotionLabel::Fear, EmotionLabel::Anger]
    );
    assert_eq!(results[2].original_text, "This makes me mad");
    assert_eq!(results[0].original_text, "I am happy today.");
    assert!(results.iter().all(|r| r.original_text == r.original_text.trim()));

    let distribution = EmotionDistribution::from_results(&results);
    assert_eq!(distribution.total(), 3);
    assert_eq!(distribution.dominant(), Some(EmotionLabel::Joy));
    Ok(())
}

#[tokio::test]
async fn pipeline_is_shareable_across_tasks() -> anyhow::Result<()> {
    let pipeline = Arc::new(with_metrics(0.0, 0.0).build()?);

    let handles: Vec<_> = ["I am terrified", "I am so happy", "This makes me mad"]
        .into_iter()
        .map(|text| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.classify(text).await })
        })
        .collect();

    let mut emotions = Vec::new();
    for handle in handles {
        emotions.push(handle.await??.emotion);
    }
    assert_eq!(
        emotions,
        vec![EmotionLabel::Fear, EmotionLabel::Joy, EmotionLabel::Anger]
    );
    Ok(())
}
