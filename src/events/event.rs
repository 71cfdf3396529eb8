use chrono::{DateTime, Utc};

/// Events emitted by client actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    // authentication
    LoginSucceeded {
        account_id: i64,
        email: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        email: String,
        reason: String,
        at: DateTime<Utc>,
    },
    LoggedOut {
        account_id: i64,
        at: DateTime<Utc>,
    },

    // tasks
    TasksLoaded {
        count: usize,
        at: DateTime<Utc>,
    },
    TaskCreated {
        at: DateTime<Utc>,
    },
    TaskUpdated {
        task_id: i64,
        at: DateTime<Utc>,
    },
    TaskRemoved {
        task_id: i64,
        at: DateTime<Utc>,
    },
    /// A task operation failed; the cache was left unchanged.
    OperationFailed {
        operation: &'static str,
        reason: String,
        at: DateTime<Utc>,
    },
}

impl ClientEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginSucceeded { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LoggedOut { .. } => "auth.logout",
            Self::TasksLoaded { .. } => "tasks.loaded",
            Self::TaskCreated { .. } => "task.created",
            Self::TaskUpdated { .. } => "task.updated",
            Self::TaskRemoved { .. } => "task.removed",
            Self::OperationFailed { .. } => "task.operation_failed",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LoginSucceeded { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LoggedOut { at, .. }
            | Self::TasksLoaded { at, .. }
            | Self::TaskCreated { at }
            | Self::TaskUpdated { at, .. }
            | Self::TaskRemoved { at, .. }
            | Self::OperationFailed { at, .. } => *at,
        }
    }
}
