use thiserror::Error;

/// Failures surfaced by the data provider's collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("SDK error: {0}")]
    Sdk(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
