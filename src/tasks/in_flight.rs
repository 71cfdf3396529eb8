//! Per-task guard against overlapping mutations.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ClientError;

/// Ids of tasks with a mutation currently on the wire.
#[derive(Clone, Default)]
pub struct InFlight {
    ids: Arc<Mutex<HashSet<i64>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `task_id` until the returned guard is dropped.
    ///
    /// # Errors
    /// Returns `ClientError::TaskBusy` if the id is already claimed.
    pub fn try_acquire(&self, task_id: i64) -> Result<InFlightGuard, ClientError> {
        let inserted = self
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(task_id);
        if !inserted {
            return Err(ClientError::TaskBusy(task_id));
        }
        Ok(InFlightGuard {
            ids: Arc::clone(&self.ids),
            task_id,
        })
    }

    pub fn is_busy(&self, task_id: i64) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&task_id)
    }
}

/// Releases its task id on drop.
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<i64>>>,
    task_id: i64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.task_id);
    }
}
