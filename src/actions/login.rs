use super::LoadTasksAction;
use crate::api::routes;
use crate::clock::ClockSkew;
use crate::crypto::hash_password;
use crate::events::ClientEvent;
use crate::session::{AccountFields, Session};
use crate::tasks::{SortController, TaskCache};
use crate::transport::{ApiRequest, Method};
use crate::validators::validate_email;
use crate::{AuthState, ClientContext, ClientError, SecretString, View};

/// Two-step challenge-response login.
///
/// 1. `GET /auth/?login={email}` returns the account id, salt and server time.
/// 2. The password is hashed with the salt and the hash signs
///    `GET /account/{id}`. Only a 2xx answer there proves the password.
///
/// The plain password is wiped once hashed and is never sent.
pub struct LoginAction<'a> {
    ctx: &'a ClientContext,
}

impl<'a> LoginAction<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        LoginAction { ctx }
    }

    /// Logs in and loads the account's tasks.
    ///
    /// A failed task load after a successful verification is logged but does
    /// not fail the login.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "login", skip_all, err))]
    pub async fn execute(&self, email: &str, password: SecretString) -> Result<Session, ClientError> {
        let ctx = self.ctx;
        ctx.session.reset();
        ctx.update_tasks(TaskCache::clear);
        ctx.with_sort(SortController::reset);

        let session = match self.authenticate(email, password).await {
            Ok(session) => session,
            Err(err) => return Err(self.fail(email, err).await),
        };

        log::info!(target: "todo_client::auth", "msg=\"login success\" account_id={}", session.account_id);
        ctx.events
            .dispatch(ClientEvent::LoginSucceeded {
                account_id: session.account_id,
                email: session.email.clone(),
                at: ctx.now(),
            })
            .await;

        if let Err(err) = LoadTasksAction::new(ctx).execute().await {
            log::warn!(target: "todo_client::auth", "msg=\"initial task load failed\" account_id={} error=\"{}\"", session.account_id, err);
        }
        Ok(session)
    }

    async fn authenticate(&self, email: &str, mut password: SecretString) -> Result<Session, ClientError> {
        let ctx = self.ctx;
        validate_email(email)?;

        ctx.set_auth_state(AuthState::SaltRequested);
        let response = ctx
            .send(ApiRequest::get(routes::AUTH).with_query("login", email))
            .await?;
        if !response.is_success() {
            return Err(ClientError::AuthRejected(response.status_line()));
        }
        let challenge: AccountFields = response.json()?;
        let (account_id, salt, issued_at) = match (challenge.account_id, &challenge.salt, challenge.timestamp) {
            (Some(id), Some(salt), Some(issued_at)) if id > 0 && !salt.is_empty() => (id, salt.clone(), issued_at),
            _ => {
                return Err(ClientError::InvalidResponse(
                    "challenge must carry AccountId, Salt and Timestamp".to_owned(),
                ))
            }
        };

        ctx.set_auth_state(AuthState::Hashing);
        let skew = ClockSkew::compute(ctx.clock.now_unix(), issued_at);
        let password_hash = hash_password(&salt, &password);
        password.clear();

        // built locally so concurrent resets of the shared session cannot strip it
        let mut pending = Session::default();
        pending.apply_server_fields(&challenge);
        pending.email = email.to_owned();
        pending.clock_skew = skew;
        pending.password_hash = Some(password_hash);
        ctx.session.update(|s| *s = pending.clone());
        log::debug!(target: "todo_client::auth", "msg=\"challenge accepted\" account_id={} skew={}", account_id, skew.secs());

        ctx.set_auth_state(AuthState::Verifying);
        let request = ctx.signed_request(&pending, Method::Get, routes::account(account_id))?;
        let response = ctx.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::AuthRejected(response.status_line()));
        }
        let account: AccountFields = response.json()?;
        if let Some(id) = account.id.filter(|id| *id != account_id) {
            return Err(ClientError::AuthRejected(format!(
                "verification returned account {id}, expected {account_id}"
            )));
        }

        if ctx.auth_state() != AuthState::Verifying {
            return Err(ClientError::AuthRejected("login was cancelled".to_owned()));
        }

        pending.apply_server_fields(&account);
        pending.id = account_id;
        pending.account_id = account_id;
        pending.mark_authenticated();
        ctx.session.update(|s| *s = pending.clone());
        ctx.set_auth_state(AuthState::LoggedIn);
        Ok(pending)
    }

    async fn fail(&self, email: &str, err: ClientError) -> ClientError {
        let ctx = self.ctx;
        ctx.session.reset();
        ctx.set_auth_state(AuthState::LoggedOut);
        ctx.show(View::Login);

        log::warn!(target: "todo_client::auth", "msg=\"login failed\" error=\"{}\"", err);
        ctx.events
            .dispatch(ClientEvent::LoginFailed {
                email: email.to_owned(),
                reason: err.to_string(),
                at: ctx.now(),
            })
            .await;
        err
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::actions::test_support::*;
    use crate::events::listeners::RecordingListener;
    use crate::transport::MockTransport;
    use crate::validators::ValidationError;

    fn password() -> SecretString {
        SecretString::new("pw")
    }

    #[tokio::test]
    async fn test_login_success() {
        let mock = MockTransport::new();
        script_login(&mock);
        mock.on_json(Method::Get, "/tasks/", json!([task_json(1, 2, "a"), task_json(2, 4, "b")]));
        let ctx = context(&mock);
        let events = RecordingListener::new();
        ctx.events.listen(events.clone());

        let session = LoginAction::new(&ctx).execute("a@b.com", password()).await.unwrap();

        assert!(session.is_valid());
        assert_eq!(session.id, ACCOUNT_ID);
        assert_eq!(session.name, "Ann");
        assert_eq!(session.clock_skew.secs(), LOCAL_TIME - SERVER_TIME);
        assert_eq!(
            session.password_hash,
            Some(hash_password("xyz", &SecretString::new("pw")))
        );
        assert_eq!(ctx.auth_state(), AuthState::LoggedIn);
        assert_eq!(ctx.view(), View::TaskList);
        assert_eq!(task_ids(&ctx), [1, 2]);
        assert_eq!(events.names(), ["auth.login.success", "tasks.loaded"]);
        assert!(events
            .events()
            .iter()
            .all(|e| e.timestamp().timestamp() == LOCAL_TIME));
    }

    #[tokio::test]
    async fn test_login_wire_format() {
        let mock = MockTransport::new();
        script_login(&mock);
        mock.on_json(Method::Get, "/tasks/", json!([]));
        let ctx = context(&mock);

        LoginAction::new(&ctx).execute("a@b.com", password()).await.unwrap();

        let challenge = &mock.sent_to(Method::Get, "/auth/")[0];
        assert_eq!(challenge.query_value("login"), Some("a@b.com"));
        assert_eq!(challenge.query.len(), 1);

        let verify = &mock.sent_to(Method::Get, "/account/42")[0];
        assert_eq!(verify.query_value("rId"), Some("42"));
        assert_eq!(verify.query_value("rTimestamp"), Some("1700000000"));
        assert_eq!(verify.query_value("rSalt").map(str::len), Some(16));
        assert_eq!(verify.query_value("rToken").map(str::len), Some(128));
        assert!(mock.sent().iter().all(|r| r.query_value("password").is_none()));
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_logged_out() {
        let mock = MockTransport::new();
        mock.on_json(
            Method::Get,
            "/auth/",
            json!({"AccountId": ACCOUNT_ID, "Salt": "xyz", "Timestamp": SERVER_TIME}),
        );
        mock.on_status(Method::Get, "/account/42", 401, "");
        let ctx = context(&mock);
        let events = RecordingListener::new();
        ctx.events.listen(events.clone());

        let result = LoginAction::new(&ctx).execute("a@b.com", password()).await;

        assert!(matches!(result, Err(ClientError::AuthRejected(_))));
        assert!(!ctx.session.is_valid());
        assert!(ctx.session.read(|s| s.password_hash.is_none()));
        assert_eq!(ctx.auth_state(), AuthState::LoggedOut);
        assert_eq!(ctx.view(), View::Login);
        assert!(mock.sent_to(Method::Get, "/tasks/").is_empty());
        assert_eq!(events.names(), ["auth.login.failed"]);
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let mock = MockTransport::new();
        mock.on_status(Method::Get, "/auth/", 404, "");
        let ctx = context(&mock);

        let result = LoginAction::new(&ctx).execute("nobody@b.com", password()).await;

        assert!(matches!(result, Err(ClientError::AuthRejected(_))));
        assert_eq!(mock.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_during_challenge() {
        let mock = MockTransport::new();
        mock.on_error(Method::Get, "/auth/", "connection refused");
        let ctx = context(&mock);

        let result = LoginAction::new(&ctx).execute("a@b.com", password()).await;

        assert_eq!(
            result.unwrap_err(),
            ClientError::TransportFailure("connection refused".to_owned())
        );
        assert!(!ctx.session.is_valid());
    }

    #[tokio::test]
    async fn test_incomplete_challenge() {
        let mock = MockTransport::new();
        mock.on_json(Method::Get, "/auth/", json!({"AccountId": 42, "Timestamp": SERVER_TIME}));
        let ctx = context(&mock);

        let result = LoginAction::new(&ctx).execute("a@b.com", password()).await;

        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
        assert!(mock.sent_to(Method::Get, "/account/42").is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_sends_nothing() {
        let mock = MockTransport::new();
        let ctx = context(&mock);

        let result = LoginAction::new(&ctx).execute("not-an-email", password()).await;

        assert_eq!(
            result.unwrap_err(),
            ClientError::Validation(ValidationError::EmailInvalidFormat)
        );
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn test_verification_for_other_account_rejected() {
        let mock = MockTransport::new();
        mock.on_json(
            Method::Get,
            "/auth/",
            json!({"AccountId": ACCOUNT_ID, "Salt": "xyz", "Timestamp": SERVER_TIME}),
        );
        mock.on_json(Method::Get, "/account/42", json!({"Id": 7, "Name": "Eve"}));
        let ctx = context(&mock);

        let result = LoginAction::new(&ctx).execute("a@b.com", password()).await;

        assert!(matches!(result, Err(ClientError::AuthRejected(_))));
        assert!(!ctx.session.is_valid());
    }

    #[tokio::test]
    async fn test_server_password_field_ignored() {
        let mock = MockTransport::new();
        mock.on_json(
            Method::Get,
            "/auth/",
            json!({"AccountId": ACCOUNT_ID, "Salt": "xyz", "Timestamp": SERVER_TIME, "Password": "planted"}),
        );
        mock.on_json(
            Method::Get,
            "/account/42",
            json!({"Id": ACCOUNT_ID, "Password": "planted"}),
        );
        mock.on_json(Method::Get, "/tasks/", json!(null));
        let ctx = context(&mock);

        let session = LoginAction::new(&ctx).execute("a@b.com", password()).await.unwrap();

        assert_eq!(
            session.password_hash,
            Some(hash_password("xyz", &SecretString::new("pw")))
        );
    }

    #[tokio::test]
    async fn test_failed_task_load_keeps_login() {
        let mock = MockTransport::new();
        script_login(&mock);
        mock.on_status(Method::Get, "/tasks/", 500, "");
        let ctx = context(&mock);

        let session = LoginAction::new(&ctx).execute("a@b.com", password()).await;

        assert!(session.is_ok());
        assert!(ctx.session.is_valid());
        assert!(ctx.read_tasks(TaskCache::is_empty));
    }

    #[tokio::test]
    async fn test_relogin_failure_discards_previous_session() {
        let mock = MockTransport::new();
        mock.on_status(Method::Get, "/auth/", 404, "");
        let ctx = context(&mock);
        log_in(&ctx);
        ctx.update_tasks(|c| c.upsert(crate::Task::mock(1, 1, 0)));

        let result = LoginAction::new(&ctx).execute("a@b.com", password()).await;

        assert!(result.is_err());
        assert!(!ctx.session.is_valid());
        assert!(ctx.read_tasks(TaskCache::is_empty));
    }
}
