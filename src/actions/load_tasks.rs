use crate::api::routes;
use crate::events::ClientEvent;
use crate::tasks::Task;
use crate::transport::Method;
use crate::{ClientContext, ClientError, View};

/// Replaces the cache with the server's task list.
///
/// The last applied sort is repeated on the fresh list. On any failure the
/// cache keeps its previous contents.
pub struct LoadTasksAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> LoadTasksAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        LoadTasksAction { ctx }
    }

    /// Returns the number of tasks now cached.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "load_tasks", skip_all, err))]
    pub async fn execute(&self) -> Result<usize, ClientError> {
        let ctx = self.ctx;
        let session = ctx.require_session()?;
        ctx.show(View::TaskList);

        let request = ctx.signed_request(&session, Method::Get, routes::TASKS)?;
        let response = ctx.send(request).await?;
        // the server encodes an empty list as `null`
        let tasks: Option<Vec<Task>> = response.json()?;
        let mut tasks = tasks.unwrap_or_default();

        let still_current = ctx
            .session
            .read(|s| s.is_valid() && s.account_id == session.account_id);
        if !still_current {
            log::debug!(target: "todo_client::tasks", "msg=\"discarding stale task list\" account_id={}", session.account_id);
            return Err(ClientError::Unauthenticated);
        }

        ctx.with_sort(|sort| sort.reapply(&mut tasks));
        let count = ctx.update_tasks(|cache| cache.replace_all(session.account_id, tasks));

        log::debug!(target: "todo_client::tasks", "msg=\"tasks loaded\" account_id={} count={}", session.account_id, count);
        ctx.events
            .dispatch(ClientEvent::TasksLoaded {
                count,
                at: ctx.now(),
            })
            .await;
        Ok(count)
    }
}
