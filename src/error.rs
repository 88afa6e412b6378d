use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Invalid word list: {0}")]
    InvalidWords(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
