//! Paths of the task API, relative to the base URL.

/// Unauthenticated challenge lookup; takes `?login={email}`.
pub const AUTH: &str = "/auth/";
/// All tasks of the signed-in account.
pub const TASKS: &str = "/tasks/";
/// Task creation.
pub const TASK: &str = "/task/";

pub fn account(account_id: i64) -> String {
    format!("/account/{account_id}")
}

pub fn task(task_id: i64) -> String {
    format!("/task/{task_id}")
}
