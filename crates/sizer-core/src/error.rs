//! Sizer error types.

use thiserror::Error;

/// Errors raised while loading or parsing sizing inputs.
///
/// The calculators themselves never fail; degenerate numbers are handled
/// by guards and surface as zero or unbounded values in the result.
#[derive(Debug, Error)]
pub enum SizerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to render TOML: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("invalid benchmark value for {field}: {value}")]
    InvalidBenchmark { field: &'static str, value: f64 },

    #[error("unknown time unit: {0}")]
    UnknownTimeUnit(String),

    #[error("unknown complexity tier: {0}")]
    UnknownComplexity(String),

    #[error("unknown headless mode: {0}")]
    UnknownHeadlessMode(String),

    #[error("unknown batch unit: {0}")]
    UnknownBatchUnit(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),
}

pub type SizerResult<T> = Result<T, SizerError>;
