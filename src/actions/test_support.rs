use std::sync::Arc;

use serde_json::{json, Value};

use crate::clock::{ClockSkew, ManualClock};
use crate::crypto::hash_password;
use crate::transport::{Method, MockTransport};
use crate::{ClientConfig, ClientContext, SecretString};

pub const SERVER_TIME: i64 = 1_700_000_000;
/// Local clock runs 100s ahead of the server.
pub const LOCAL_TIME: i64 = 1_700_000_100;
pub const ACCOUNT_ID: i64 = 42;

pub fn context(mock: &MockTransport) -> ClientContext {
    context_with_clock(mock, ManualClock::new(LOCAL_TIME))
}

pub fn context_with_clock(mock: &MockTransport, clock: ManualClock) -> ClientContext {
    ClientContext::new(
        ClientConfig::default(),
        Arc::new(mock.clone()),
        Arc::new(clock),
    )
}

pub fn script_login(mock: &MockTransport) {
    mock.on_json(
        Method::Get,
        "/auth/",
        json!({"AccountId": ACCOUNT_ID, "Salt": "xyz", "Timestamp": SERVER_TIME, "Role": "User"}),
    );
    mock.on_json(
        Method::Get,
        "/account/42",
        json!({"Id": ACCOUNT_ID, "Name": "Ann", "Email": "a@b.com", "Password": "", "Salt": "xyz", "Role": "User", "LastAuth": SERVER_TIME}),
    );
}

/// Puts the context into a verified session without going over the wire.
pub fn log_in(ctx: &ClientContext) {
    ctx.session.update(|s| {
        s.id = ACCOUNT_ID;
        s.account_id = ACCOUNT_ID;
        s.salt = "xyz".to_owned();
        s.password_hash = Some(hash_password("xyz", &SecretString::new("pw")));
        s.clock_skew = ClockSkew::compute(LOCAL_TIME, SERVER_TIME);
        s.mark_authenticated();
    });
}

pub fn task_json(id: i64, priority: i64, text: &str) -> Value {
    json!({
        "Id": id,
        "AccountId": ACCOUNT_ID,
        "Created": SERVER_TIME + id,
        "LastUpdated": SERVER_TIME + id,
        "Priority": priority,
        "Task": text
    })
}

pub fn task_ids(ctx: &ClientContext) -> Vec<i64> {
    ctx.read_tasks(|c| c.tasks().iter().map(|t| t.id).collect())
}
