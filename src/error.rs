//! Custom error types for sales-loader

use thiserror::Error;

/// Main error type for sales-loader operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Schema error: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("CSV header mismatch: expected {expected:?}, found {found:?}")]
    Header { expected: String, found: String },

    #[error("Parse error at row {row}, field {field}: {message}")]
    Parse {
        row: usize,
        field: &'static str,
        message: String,
    },

    #[error("CSV input contains no data rows")]
    EmptyInput,

    #[error("Merge error: {0}")]
    Merge(#[source] sqlx::Error),

    #[error("Load failed during {stage}: {source}")]
    Load {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl Error {
    /// Wrap a stage failure into the single pipeline-level load error.
    pub fn at_stage(self, stage: &'static str) -> Self {
        Error::Load {
            stage,
            source: Box::new(self),
        }
    }

    /// The original cause of a wrapped load error, or the error itself.
    pub fn cause(&self) -> &Error {
        match self {
            Error::Load { source, .. } => source.cause(),
            other => other,
        }
    }
}

/// Result type alias for sales-loader
pub type Result<T> = std::result::Result<T, Error>;
