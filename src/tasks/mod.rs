//! Task records and the client-side task list.

mod cache;
mod in_flight;
mod sort;

pub use cache::TaskCache;
pub use in_flight::{InFlight, InFlightGuard};
pub use sort::{Direction, SortController, SortField};

use serde::{Deserialize, Serialize};

/// A task as returned by the API. Timestamps are unix seconds set by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "AccountId")]
    pub account_id: i64,
    #[serde(rename = "Task")]
    pub text: String,
    #[serde(rename = "Priority")]
    /// Stored as sent by the server; only outgoing forms are range-checked.
    pub priority: i64,
    #[serde(rename = "Created")]
    pub created_at: i64,
    #[serde(rename = "LastUpdated")]
    pub last_updated_at: i64,
}

#[cfg(test)]
impl Task {
    pub fn mock(id: i64, priority: i64, created_at: i64) -> Self {
        Task {
            id,
            account_id: 42,
            text: format!("task {id}"),
            priority,
            created_at,
            last_updated_at: created_at,
        }
    }
}
