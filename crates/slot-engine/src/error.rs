//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store failure: {0}")]
    Store(String),
}

impl SchedulingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn host_not_found(username: &str) -> Self {
        Self::NotFound(format!("host '{}'", username))
    }

    pub fn out_of_range(what: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{} is out of the supported date range", what))
    }
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
