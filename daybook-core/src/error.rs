//! Error types for daybook.
//!
//! Only the store, config and input parsing can fail. Recurrence evaluation is
//! total and never returns one of these.

use thiserror::Error;

/// Errors that can occur in daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task store error: {0}")]
    Store(String),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task id '{0}' is ambiguous, matches {1} tasks")]
    AmbiguousId(String, usize),

    #[error("'{0}' repeats; deleting it removes every future occurrence and needs confirmation")]
    ConfirmationRequired(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
