use crate::api::routes;
use crate::tasks::Task;
use crate::transport::Method;
use crate::{ClientContext, ClientError};

/// Fetches one task and refreshes its cached copy.
pub struct GetTaskAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> GetTaskAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        GetTaskAction { ctx }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "get_task", skip_all, err))]
    pub async fn execute(&self, task_id: i64) -> Result<Task, ClientError> {
        let ctx = self.ctx;
        let session = ctx.require_session()?;

        let request = ctx.signed_request(&session, Method::Get, routes::task(task_id))?;
        let response = ctx.send(request).await?;
        if response.status == 404 {
            return Err(ClientError::TaskNotFound(task_id));
        }
        let task: Task = response.json()?;
        if task.account_id != session.account_id {
            log::warn!(target: "todo_client::tasks", "msg=\"foreign task ignored\" task_id={} account_id={}", task_id, task.account_id);
            return Err(ClientError::TaskNotFound(task_id));
        }

        ctx.update_tasks(|cache| cache.upsert(task.clone()));
        Ok(task)
    }
}
