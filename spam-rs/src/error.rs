use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid smoothing parameter: {0} (must be a finite value >= 0)")]
    InvalidAlpha(f64),

    #[error("Invalid probability: {0} (must be between 0 and 1 included)")]
    InvalidProbability(f64),

    #[error("Degenerate model: {0}")]
    DegenerateModel(String),

    #[error("Length mismatch: expected {expected} predictions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Detector has not been fitted")]
    NotFitted,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SpamError>;
