use super::{reload_after, send_acknowledged};
use crate::api::{routes, NewTaskForm, Operation};
use crate::events::ClientEvent;
use crate::transport::Method;
use crate::validators::{validate_priority, validate_task_text};
use crate::{ClientContext, ClientError};

/// Creates a task, then reloads the list to pick up its server-assigned id.
pub struct CreateTaskAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> CreateTaskAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        CreateTaskAction { ctx }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "create_task", skip_all, err))]
    pub async fn execute(&self, text: &str, priority: u8) -> Result<(), ClientError> {
        let ctx = self.ctx;
        let session = ctx.require_session()?;
        validate_task_text(text)?;
        validate_priority(priority)?;

        let form = NewTaskForm {
            account_id: session.account_id,
            text: text.to_owned(),
            priority,
        };
        let request = ctx
            .signed_request(&session, Method::Post, routes::TASK)?
            .with_form(form.into_pairs());
        send_acknowledged(ctx, request, Operation::Add).await?;

        log::info!(target: "todo_client::tasks", "msg=\"task created\" account_id={}", session.account_id);
        ctx.events
            .dispatch(ClientEvent::TaskCreated { at: ctx.now() })
            .await;
        reload_after(ctx, Operation::Add).await;
        Ok(())
    }
}
