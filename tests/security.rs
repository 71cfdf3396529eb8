//! Security-focused test suite.
//!
//! Checks that the password never leaves the client, that every signed
//! request carries a fresh nonce and that a server holding the password
//! hash can verify the token.
//!
//! Run with: `cargo test --test security`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use todo_client::clock::ClockSkew;
use todo_client::crypto::{generate_nonce, hash_password, request_token, NONCE_LENGTH};
use todo_client::{
    ClientConfig, ManualClock, Method, MockTransport, SecretString, Session, TodoClient,
    TokenSigner,
};

const SERVER_TIME: i64 = 1_700_000_000;
const PASSWORD: &str = "correct horse";

async fn logged_in_client() -> (TodoClient, MockTransport) {
    let mock = MockTransport::new();
    mock.on_json(
        Method::Get,
        "/auth/",
        json!({"AccountId": 42, "Salt": "NaCl", "Timestamp": SERVER_TIME}),
    );
    mock.on_json(Method::Get, "/account/42", json!({"Id": 42}));
    mock.on_json(Method::Get, "/tasks/", json!([]));
    let client = TodoClient::with_transport(
        ClientConfig::default(),
        Arc::new(mock.clone()),
        Arc::new(ManualClock::new(SERVER_TIME + 3)),
    );
    client.login("a@b.com", PASSWORD).await.unwrap();
    (client, mock)
}

// =============================================================================
// Password handling
// =============================================================================

#[tokio::test]
async fn password_and_hash_never_sent() {
    let (client, mock) = logged_in_client().await;
    client.load_tasks().await.unwrap();

    let hash = hash_password("NaCl", &SecretString::new(PASSWORD));
    for request in mock.sent() {
        let values = request.query.iter().chain(request.form.iter().flatten());
        for (_, value) in values {
            assert!(!value.contains(PASSWORD));
            assert_ne!(value, hash.expose_secret());
        }
    }
}

#[tokio::test]
async fn session_debug_redacts_hash() {
    let (client, _) = logged_in_client().await;
    let session = client.session();
    let hash = session.password_hash.clone().unwrap();

    let debug = format!("{:?}", session);
    assert!(!debug.contains(hash.expose_secret()));
}

#[test]
fn secret_string_redacts_in_debug_and_display() {
    let secret = SecretString::new("hunter2");
    assert!(!format!("{:?}", secret).contains("hunter2"));
    assert!(!format!("{}", secret).contains("hunter2"));
    assert_eq!(secret.expose_secret(), "hunter2");
}

#[test]
fn secret_string_clear_wipes_value() {
    let mut secret = SecretString::new("hunter2");
    secret.clear();
    assert!(secret.is_empty());
}

// =============================================================================
// Request signatures
// =============================================================================

#[tokio::test]
async fn server_can_verify_signature() {
    let (client, mock) = logged_in_client().await;
    client.load_tasks().await.unwrap();

    // what the server stores for the account
    let stored_hash = hash_password("NaCl", &SecretString::new(PASSWORD));
    let request = mock.sent_to(Method::Get, "/tasks/").pop().unwrap();

    let timestamp: i64 = request.query_value("rTimestamp").unwrap().parse().unwrap();
    let nonce = request.query_value("rSalt").unwrap();
    let expected = request_token(timestamp, nonce, &stored_hash);

    assert_eq!(request.query_value("rId"), Some("42"));
    assert_eq!(request.query_value("rToken"), Some(expected.as_str()));
    assert!(ClockSkew::within_tolerance(timestamp, SERVER_TIME));
}

#[tokio::test]
async fn every_request_gets_a_fresh_nonce() {
    let (client, mock) = logged_in_client().await;
    for _ in 0..20 {
        client.load_tasks().await.unwrap();
    }

    let signed: Vec<_> = mock
        .sent()
        .into_iter()
        .filter(|r| r.query_value("rToken").is_some())
        .collect();
    let nonces: HashSet<String> = signed
        .iter()
        .map(|r| r.query_value("rSalt").unwrap().to_owned())
        .collect();
    let tokens: HashSet<String> = signed
        .iter()
        .map(|r| r.query_value("rToken").unwrap().to_owned())
        .collect();

    assert_eq!(nonces.len(), signed.len());
    assert_eq!(tokens.len(), signed.len());
}

#[test]
fn nonces_are_alphanumeric() {
    let nonce = generate_nonce(NONCE_LENGTH);
    assert_eq!(nonce.len(), NONCE_LENGTH);
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn signing_without_hash_is_refused() {
    let signer = TokenSigner::new(Arc::new(ManualClock::new(SERVER_TIME)));
    assert!(signer.sign(&Session::default()).is_err());
}

#[test]
fn token_depends_on_every_input() {
    let hash = hash_password("NaCl", &SecretString::new(PASSWORD));
    let other_hash = hash_password("NaCl", &SecretString::new("wrong"));
    let base = request_token(SERVER_TIME, "abcdEFGH12345678", &hash);

    assert_ne!(base, request_token(SERVER_TIME + 1, "abcdEFGH12345678", &hash));
    assert_ne!(base, request_token(SERVER_TIME, "abcdEFGH12345679", &hash));
    assert_ne!(base, request_token(SERVER_TIME, "abcdEFGH12345678", &other_hash));
}
