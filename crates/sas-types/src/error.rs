use thiserror::Error;

#[derive(Error, Debug)]
pub enum SasError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown parameter {name:?} for model {model}; parameters are: {available}")]
    UnknownParameter {
        model: String,
        name: String,
        available: String,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Model check failed: {0}")]
    CheckFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SasResult<T> = Result<T, SasError>;
