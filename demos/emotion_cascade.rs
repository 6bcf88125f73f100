use anyhow::Result;
use emotia::pipelines::emotion_classification_pipeline::*;
use emotia::CascadeConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("emotia=debug".parse()?))
        .init();

    // Pass a JSON config path as the first argument to override the defaults.
    let config = match std::env::args().nth(1) {
        Some(path) => CascadeConfig::from_file(path)?,
        None => CascadeConfig::default(),
    };

    println!("Building pipeline...");

    let pipeline = EmotionClassificationPipelineBuilder::lexicon()?
        .config(config)
        .http_translator()
        .build()?;

    println!("Pipeline built successfully.");

    let text = "I love my new car\n\
                Estoy muy triste hoy\n\
                The meeting moved to Thursday\n\
                This traffic makes me so mad";

    let results = pipeline.classify_lines(text).await?;

    println!("\n=== Emotion Classification Results ===");
    for result in &results {
        println!("Text: \"{}\"", result.original_text);
        if let Some(translated) = &result.translated_text {
            println!("  Translated: \"{}\"", translated);
        }
        println!(
            "  Emotion: {} (score: {:.2}, method: {})",
            result.emotion, result.score, result.method
        );
    }

    let distribution = EmotionDistribution::from_results(&results);
    println!("\n=== Distribution ===");
    for (emotion, count) in distribution.iter() {
        println!(
            "{:>8}: {} ({:.0}%)",
            emotion,
            count,
            distribution.percentage(emotion)
        );
    }

    Ok(())
}
