use thiserror::Error;

/// Error returned by a classification call.
///
/// Recoverable strategy failures (translator down, classifier failing, no
/// keyword hits) never show up here; they only move the cascade along.
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// The sentiment metrics behind the polarity heuristic could not be
    /// computed. There is no strategy left to fall back to.
    #[error("sentiment metrics could not be computed: {0}")]
    Metrics(#[source] anyhow::Error),

    /// Every configured strategy declined to answer.
    #[error("no classification strategy produced a result")]
    NoStrategyAvailable,
}

/// Error raised while loading or validating a cascade configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed fine but is outside its allowed range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
