//! Handle to a lookup running in the background

use super::types::LookupOutcome;
use crate::error::{InternalError, Result};
use tokio::task::JoinHandle;

/// A detached lookup
///
/// Joining yields the same result the synchronous lookup would have
/// returned. Dropping the handle detaches the task; it runs to completion
/// unobserved and does not hold the runtime open at shutdown.
#[derive(Debug)]
pub struct LookupHandle {
    task: JoinHandle<Result<LookupOutcome>>,
}

impl LookupHandle {
    pub(crate) fn new(task: JoinHandle<Result<LookupOutcome>>) -> Self {
        Self { task }
    }

    /// Wait for the lookup to finish
    pub async fn join(self) -> Result<LookupOutcome> {
        self.task
            .await
            .map_err(|e| InternalError::task_failed("subtitle lookup", e.to_string()))?
    }

    /// Check without waiting whether the lookup has finished
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
