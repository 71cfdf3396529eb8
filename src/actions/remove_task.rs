use super::{reload_after, send_acknowledged};
use crate::api::{routes, Operation};
use crate::events::ClientEvent;
use crate::transport::Method;
use crate::{ClientContext, ClientError, View};

/// Deletes a task, then reloads the list.
pub struct RemoveTaskAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> RemoveTaskAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        RemoveTaskAction { ctx }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "remove_task", skip_all, err))]
    pub async fn execute(&self, task_id: i64) -> Result<(), ClientError> {
        let ctx = self.ctx;
        let session = ctx.require_session()?;
        let guard = ctx.in_flight.try_acquire(task_id)?;

        let request = ctx.signed_request(&session, Method::Delete, routes::task(task_id))?;
        send_acknowledged(ctx, request, Operation::Delete).await?;
        drop(guard);

        log::info!(target: "todo_client::tasks", "msg=\"task removed\" task_id={}", task_id);
        ctx.events
            .dispatch(ClientEvent::TaskRemoved {
                task_id,
                at: ctx.now(),
            })
            .await;
        reload_after(ctx, Operation::Delete).await;
        ctx.show(View::TaskList);
        Ok(())
    }
}
