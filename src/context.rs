//! Per-client state shared by all actions.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::api::Operation;
use crate::clock::Clock;
use crate::events::{ClientEvent, EventRegistry};
use crate::session::{Session, SessionStore};
use crate::signer::TokenSigner;
use crate::tasks::{InFlight, SortController, TaskCache};
use crate::transport::{ApiRequest, ApiResponse, ApiTransport, Method};
use crate::{ClientConfig, ClientError};

/// Progress of the two-step login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    /// Waiting for the salt/challenge lookup.
    SaltRequested,
    /// Deriving the skew and the password hash.
    Hashing,
    /// Waiting for the signed account lookup that proves the password.
    Verifying,
    LoggedIn,
}

impl AuthState {
    /// True between the challenge request and the end of verification.
    pub fn is_logging_in(&self) -> bool {
        matches!(
            self,
            AuthState::SaltRequested | AuthState::Hashing | AuthState::Verifying
        )
    }
}

/// What the front end should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    TaskList,
}

/// Session, task cache and collaborators of one client.
///
/// Several contexts can live side by side, e.g. one per test.
pub struct ClientContext {
    pub config: ClientConfig,
    pub transport: Arc<dyn ApiTransport>,
    pub clock: Arc<dyn Clock>,
    pub signer: TokenSigner,
    pub session: SessionStore,
    pub tasks: RwLock<TaskCache>,
    pub sort: Mutex<SortController>,
    pub in_flight: InFlight,
    pub events: EventRegistry,
    auth_state: Mutex<AuthState>,
    view: Mutex<View>,
}

impl ClientContext {
    pub fn new(config: ClientConfig, transport: Arc<dyn ApiTransport>, clock: Arc<dyn Clock>) -> Self {
        let signer = TokenSigner::with_nonce_length(Arc::clone(&clock), config.nonce_length);
        Self {
            config,
            transport,
            clock,
            signer,
            session: SessionStore::new(),
            tasks: RwLock::new(TaskCache::new()),
            sort: Mutex::new(SortController::new()),
            in_flight: InFlight::new(),
            events: EventRegistry::new(),
            auth_state: Mutex::new(AuthState::LoggedOut),
            view: Mutex::new(View::Login),
        }
    }

    pub fn auth_state(&self) -> AuthState {
        *self.auth_state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_auth_state(&self, state: AuthState) {
        let mut current = self.auth_state.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != state {
            log::debug!(target: "todo_client::auth", "auth_state {:?} -> {:?}", *current, state);
            *current = state;
        }
    }

    pub fn view(&self) -> View {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn show(&self, view: View) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = view;
    }

    pub fn read_tasks<R>(&self, f: impl FnOnce(&TaskCache) -> R) -> R {
        let guard = self.tasks.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn update_tasks<R>(&self, f: impl FnOnce(&mut TaskCache) -> R) -> R {
        let mut guard = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn with_sort<R>(&self, f: impl FnOnce(&mut SortController) -> R) -> R {
        let mut guard = self.sort.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Current time of the injected clock, used for event timestamps.
    pub fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.clock.now_unix(), 0).unwrap_or_default()
    }

    /// Returns the session if it is verified.
    ///
    /// Otherwise the session is reset, the login view is shown and
    /// `Unauthenticated` is returned, so nothing gets transmitted. While a
    /// login is in progress the half-built session is left alone.
    pub fn require_session(&self) -> Result<Session, ClientError> {
        let session = self.session.snapshot();
        if session.is_valid() {
            return Ok(session);
        }
        if self.auth_state().is_logging_in() {
            return Err(ClientError::Unauthenticated);
        }

        self.session.reset();
        self.set_auth_state(AuthState::LoggedOut);
        self.show(View::Login);
        Err(ClientError::Unauthenticated)
    }

    /// Builds a request with the signature for `session` appended to its query.
    pub fn signed_request(
        &self,
        session: &Session,
        method: Method,
        path: impl Into<String>,
    ) -> Result<ApiRequest, ClientError> {
        let signed = self.signer.sign(session)?;
        Ok(ApiRequest::new(method, path).with_query_pairs(signed.into_pairs()))
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.transport.send(request).await
    }

    /// Logs and announces a failed task operation, then hands the error back.
    pub(crate) async fn operation_failed(&self, operation: Operation, err: ClientError) -> ClientError {
        log::warn!(target: "todo_client::tasks", "msg=\"operation failed\" operation={} error=\"{}\"", operation.marker_key(), err);
        self.events
            .dispatch(ClientEvent::OperationFailed {
                operation: operation.marker_key(),
                reason: err.to_string(),
                at: self.now(),
            })
            .await;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockSkew, ManualClock};
    use crate::transport::MockTransport;
    use crate::SecretString;

    fn context() -> ClientContext {
        ClientContext::new(
            ClientConfig::default(),
            Arc::new(MockTransport::new()),
            Arc::new(ManualClock::new(1_000)),
        )
    }

    #[test]
    fn test_initial_state() {
        let ctx = context();
        assert_eq!(ctx.auth_state(), AuthState::LoggedOut);
        assert_eq!(ctx.view(), View::Login);
        assert!(ctx.read_tasks(TaskCache::is_empty));
    }

    #[test]
    fn test_require_session_redirects_to_login() {
        let ctx = context();
        ctx.show(View::TaskList);
        ctx.session.update(|s| s.account_id = 42);

        assert_eq!(ctx.require_session().unwrap_err(), ClientError::Unauthenticated);
        assert_eq!(ctx.view(), View::Login);
        assert_eq!(ctx.session.read(|s| s.account_id), 0);
    }

    #[test]
    fn test_require_session_keeps_pending_login() {
        let ctx = context();
        ctx.session.update(|s| {
            s.account_id = 42;
            s.password_hash = Some(SecretString::new("hash"));
        });
        ctx.set_auth_state(AuthState::Verifying);

        assert_eq!(ctx.require_session().unwrap_err(), ClientError::Unauthenticated);
        assert_eq!(ctx.session.read(|s| s.account_id), 42);
        assert!(ctx.session.read(|s| s.password_hash.is_some()));
        assert_eq!(ctx.auth_state(), AuthState::Verifying);
    }

    #[test]
    fn test_now_follows_injected_clock() {
        let ctx = context();
        assert_eq!(ctx.now().timestamp(), 1_000);
    }

    #[test]
    fn test_require_session_ok() {
        let ctx = context();
        ctx.session.update(|s| {
            s.account_id = 42;
            s.mark_authenticated();
        });

        assert_eq!(ctx.require_session().unwrap().account_id, 42);
    }

    #[test]
    fn test_signed_request_appends_signature() {
        let ctx = context();
        let mut session = Session::default();
        session.account_id = 42;
        session.password_hash = Some(SecretString::new("hash"));
        session.clock_skew = ClockSkew::from_secs(-20);

        let request = ctx.signed_request(&session, Method::Get, "/tasks/").unwrap();

        assert_eq!(request.path, "/tasks/");
        assert_eq!(request.query_value("rId"), Some("42"));
        assert_eq!(request.query_value("rTimestamp"), Some("1020"));
        assert_eq!(request.query.len(), 4);
    }

    #[test]
    fn test_signed_request_without_hash() {
        let ctx = context();
        assert_eq!(
            ctx.signed_request(&Session::default(), Method::Get, "/tasks/"),
            Err(ClientError::Unauthenticated)
        );
    }
}
