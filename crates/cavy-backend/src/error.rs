//! Error type for sampling backends.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("backend not available: {0}")]
    Unavailable(String),

    #[error("invalid circuit: {0}")]
    InvalidCircuit(String),

    #[error("invalid shot count: {0}")]
    InvalidShots(String),
}

pub type BackendResult<T> = Result<T, BackendError>;
