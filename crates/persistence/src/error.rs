//! Persistence error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Quarantine failed for {path}: {message}")]
    Quarantine { path: String, message: String },
}

impl From<StoreError> for sdr_agent_core::Error {
    fn from(e: StoreError) -> Self {
        sdr_agent_core::Error::Store(e.to_string())
    }
}
