use crate::events::ClientEvent;
use crate::tasks::{SortController, TaskCache};
use crate::{AuthState, ClientContext, ClientError, View};

/// Forgets the session and everything loaded under it. Purely local.
pub struct LogoutAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> LogoutAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        LogoutAction { ctx }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "logout", skip_all, err))]
    pub async fn execute(&self) -> Result<(), ClientError> {
        let ctx = self.ctx;
        let account_id = ctx.session.read(|s| s.account_id);

        ctx.session.reset();
        ctx.update_tasks(TaskCache::clear);
        ctx.with_sort(SortController::reset);
        ctx.set_auth_state(AuthState::LoggedOut);
        ctx.show(View::Login);

        ctx.events
            .dispatch(ClientEvent::LoggedOut {
                account_id,
                at: ctx.now(),
            })
            .await;
        log::info!(target: "todo_client::auth", "msg=\"logout success\" account_id={}", account_id);
        Ok(())
    }
}
