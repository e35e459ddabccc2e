use thiserror::Error;

/// Errors produced by the data layer. None of them are fatal: the caller decides whether to
/// disable an action or show feedback.
#[derive(Debug, Error)]
pub enum WakeLogError {
    #[error("At most {max} custom reasons are allowed")]
    CapacityExceeded { max: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode stored data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Failed to write csv: {0}")]
    Export(#[from] csv::Error),
}

pub type Result<T, E = WakeLogError> = std::result::Result<T, E>;
