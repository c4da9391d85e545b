use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported movement: '{0}' (expected squat, bench or deadlift)")]
    UnsupportedMovement(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type FormResult<T> = Result<T, FormError>;
