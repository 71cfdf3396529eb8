use super::send_acknowledged;
use crate::api::{routes, EditTaskForm, Operation};
use crate::events::ClientEvent;
use crate::transport::Method;
use crate::validators::{validate_priority, validate_task_text};
use crate::{ClientContext, ClientError, View};

/// Edits the text and priority of a cached task.
///
/// The cached copy changes only after the server acknowledges the edit.
/// A second mutation of the same task while this one is on the wire fails
/// with `TaskBusy`.
pub struct UpdateTaskAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> UpdateTaskAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        UpdateTaskAction { ctx }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "update_task", skip_all, err))]
    pub async fn execute(&self, task_id: i64, text: &str, priority: u8) -> Result<(), ClientError> {
        let ctx = self.ctx;
        let session = ctx.require_session()?;
        validate_task_text(text)?;
        validate_priority(priority)?;

        let account_id = ctx
            .read_tasks(|cache| cache.get(task_id).map(|t| t.account_id))
            .ok_or(ClientError::TaskNotFound(task_id))?;
        let _guard = ctx.in_flight.try_acquire(task_id)?;

        let form = EditTaskForm {
            id: task_id,
            account_id,
            text: text.to_owned(),
            priority,
        };
        let request = ctx
            .signed_request(&session, Method::Put, routes::task(task_id))?
            .with_form(form.into_pairs());
        let outcome = send_acknowledged(ctx, request, Operation::Edit).await;
        ctx.show(View::TaskList);
        outcome?;

        match ctx.update_tasks(|cache| cache.update_in_place(task_id, text, priority)) {
            Ok(()) => {}
            // a reload raced the edit away; the next load shows the server copy
            Err(ClientError::TaskNotFound(_)) => {
                log::debug!(target: "todo_client::tasks", "msg=\"edited task no longer cached\" task_id={}", task_id);
            }
            Err(err) => return Err(err),
        }

        log::info!(target: "todo_client::tasks", "msg=\"task updated\" task_id={}", task_id);
        ctx.events
            .dispatch(ClientEvent::TaskUpdated {
                task_id,
                at: ctx.now(),
            })
            .await;
        Ok(())
    }
}
