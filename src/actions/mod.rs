//! One action per client operation.
//!
//! Each action borrows the [`ClientContext`] and exposes an async
//! `execute`. Protected actions check the session first and fail with
//! `Unauthenticated` before anything is sent.

mod create_task;
mod get_task;
mod load_tasks;
mod login;
mod logout;
mod remove_task;
mod update_task;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_task::CreateTaskAction;
pub use get_task::GetTaskAction;
pub use load_tasks::LoadTasksAction;
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use remove_task::RemoveTaskAction;
pub use update_task::UpdateTaskAction;

use crate::api::{Acknowledgment, Operation};
use crate::transport::ApiRequest;
use crate::{ClientContext, ClientError};

/// Sends a mutating request and requires its success marker.
///
/// Any failure is announced as `OperationFailed` before being returned.
async fn send_acknowledged(
    ctx: &ClientContext,
    request: ApiRequest,
    operation: Operation,
) -> Result<(), ClientError> {
    let outcome = async {
        let response = ctx.send(request).await?;
        let ack: Acknowledgment = response.json()?;
        ack.require_success(operation)
    }
    .await;

    match outcome {
        Ok(()) => Ok(()),
        Err(err) => Err(ctx.operation_failed(operation, err).await),
    }
}

/// Resynchronizes the cache after a confirmed mutation.
///
/// The mutation already happened on the server, so a failed reload is only
/// logged; the next successful load converges the cache.
async fn reload_after(ctx: &ClientContext, operation: Operation) {
    if let Err(err) = LoadTasksAction::new(ctx).execute().await {
        log::warn!(target: "todo_client::tasks", "msg=\"reload after mutation failed\" operation={} error=\"{}\"", operation.marker_key(), err);
    }
}
