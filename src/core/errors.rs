use thiserror::Error;

#[derive(Error, Debug)]
pub enum VokabelError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("Catalog entry '{0}' has no example sentences")]
    EmptyExamples(String),

    #[error("Invalid quota: target {target} with segment size {segment_size} (both must be positive, at most 1000 slots)")]
    InvalidQuota { target: i64, segment_size: i64 },

    #[error("No card is currently shown")]
    NoCurrentCard,

    #[error("The card has to be revealed before it can be answered")]
    NotRevealed,

    #[error("VokabelError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for VokabelError {
    fn from(error: std::io::Error) -> Self {
        VokabelError::Io(Box::new(error))
    }
}
