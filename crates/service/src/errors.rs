use thiserror::Error;

use crate::messages::{MISSING_FIELD_MESSAGE, QUEUE_EMPTY_MESSAGE};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    QueueEmpty(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn missing_field() -> Self { Self::MissingField(MISSING_FIELD_MESSAGE.into()) }
    pub fn queue_empty() -> Self { Self::QueueEmpty(QUEUE_EMPTY_MESSAGE.into()) }
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}
