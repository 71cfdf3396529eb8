use std::sync::Arc;

use crate::actions::{
    CreateTaskAction, GetTaskAction, LoadTasksAction, LoginAction, LogoutAction, RemoveTaskAction,
    UpdateTaskAction,
};
use crate::events::Listener;
use crate::tasks::{Direction, SortField, Task};
use crate::transport::{ApiTransport, HttpTransport};
use crate::{
    AuthState, ClientConfig, ClientContext, ClientError, Clock, SecretString, Session, SystemClock,
    View,
};

/// Entry point of the crate: one logged-in (or not yet logged-in) user.
///
/// Cheap to clone; clones share the session and the task cache.
#[derive(Clone)]
pub struct TodoClient {
    ctx: Arc<ClientContext>,
}

impl TodoClient {
    /// A client talking HTTP to `config.base_url` with the system clock.
    pub fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport), Arc::new(SystemClock)))
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn ApiTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        TodoClient {
            ctx: Arc::new(ClientContext::new(config, transport, clock)),
        }
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    pub fn listen(&self, listener: impl Listener) -> &Self {
        self.ctx.events.listen(listener);
        self
    }

    pub async fn login(&self, email: &str, password: impl Into<SecretString>) -> Result<Session, ClientError> {
        LoginAction::new(&self.ctx).execute(email, password.into()).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        LogoutAction::new(&self.ctx).execute().await
    }

    pub async fn load_tasks(&self) -> Result<usize, ClientError> {
        LoadTasksAction::new(&self.ctx).execute().await
    }

    pub async fn get_task(&self, task_id: i64) -> Result<Task, ClientError> {
        GetTaskAction::new(&self.ctx).execute(task_id).await
    }

    pub async fn create_task(&self, text: &str, priority: u8) -> Result<(), ClientError> {
        CreateTaskAction::new(&self.ctx).execute(text, priority).await
    }

    pub async fn update_task(&self, task_id: i64, text: &str, priority: u8) -> Result<(), ClientError> {
        UpdateTaskAction::new(&self.ctx).execute(task_id, text, priority).await
    }

    pub async fn remove_task(&self, task_id: i64) -> Result<(), ClientError> {
        RemoveTaskAction::new(&self.ctx).execute(task_id).await
    }

    /// Sorts the cached tasks by `field`, alternating direction per field.
    pub fn sort_by(&self, field: SortField) -> Direction {
        self.ctx.with_sort(|sort| {
            let direction = sort.next_direction(field);
            self.ctx.update_tasks(|cache| cache.sort_by(sort, field));
            direction
        })
    }

    /// Snapshot of the cached tasks in display order.
    pub fn tasks(&self) -> Vec<Task> {
        self.ctx.read_tasks(|cache| cache.tasks().to_vec())
    }

    pub fn session(&self) -> Session {
        self.ctx.session.snapshot()
    }

    pub fn is_logged_in(&self) -> bool {
        self.ctx.session.is_valid()
    }

    pub fn auth_state(&self) -> AuthState {
        self.ctx.auth_state()
    }

    pub fn view(&self) -> View {
        self.ctx.view()
    }
}
