use crate::model::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to reach the listing store: {0}")]
    FetchFailed(String),

    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    #[error("Malformed persisted state for '{key}': {reason}")]
    MalformedPersistedState { key: String, reason: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    /// True for failures a caller may reasonably retry by hand.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::FetchFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
