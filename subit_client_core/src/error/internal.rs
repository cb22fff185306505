//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// A background task panicked or was cancelled by the runtime
    #[error("Background task '{task}' failed: {message}")]
    TaskFailed { task: String, message: String },
}

impl InternalError {
    /// Create a task failure error
    pub fn task_failed(task: &str, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            task: task.to_string(),
            message: message.into(),
        }
    }
}
