//! Per-request signing.
//!
//! A protected request carries four query parameters, always in this order:
//!
//! | param        | value                                              |
//! |--------------|----------------------------------------------------|
//! | `rId`        | account id                                         |
//! | `rTimestamp` | local unix seconds corrected by the session skew   |
//! | `rSalt`      | fresh alphanumeric nonce                           |
//! | `rToken`     | hex SHA-512 of `rTimestamp || rSalt || password hash` |
//!
//! The server recomputes the token from its stored hash and accepts the
//! request only if the timestamp is within its tolerance window.

use std::sync::Arc;

use crate::clock::Clock;
use crate::crypto::{generate_nonce, request_token, NONCE_LENGTH};
use crate::session::Session;
use crate::ClientError;

/// The signature for one outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    pub account_id: i64,
    pub timestamp: i64,
    pub salt: String,
    pub token: String,
}

impl SignedQuery {
    /// Query pairs in wire order.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        vec![
            ("rId".to_owned(), self.account_id.to_string()),
            ("rTimestamp".to_owned(), self.timestamp.to_string()),
            ("rSalt".to_owned(), self.salt),
            ("rToken".to_owned(), self.token),
        ]
    }
}

/// Produces [`SignedQuery`] values from a session.
#[derive(Clone)]
pub struct TokenSigner {
    clock: Arc<dyn Clock>,
    nonce_length: usize,
}

impl TokenSigner {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_nonce_length(clock, NONCE_LENGTH)
    }

    pub fn with_nonce_length(clock: Arc<dyn Clock>, nonce_length: usize) -> Self {
        Self {
            clock,
            nonce_length,
        }
    }

    /// Signs one request for `session`.
    ///
    /// Only the password hash is required, not a fully verified session: the
    /// login verification call itself is signed with the freshly derived hash.
    ///
    /// # Errors
    /// Returns `ClientError::Unauthenticated` when the session has no password hash.
    pub fn sign(&self, session: &Session) -> Result<SignedQuery, ClientError> {
        let password_hash = match &session.password_hash {
            Some(hash) if !hash.is_empty() => hash,
            _ => return Err(ClientError::Unauthenticated),
        };

        let timestamp = session.clock_skew.server_time(self.clock.now_unix());
        let salt = generate_nonce(self.nonce_length);
        let token = request_token(timestamp, &salt, password_hash);

        Ok(SignedQuery {
            account_id: session.account_id,
            timestamp,
            salt,
            token,
        })
    }
}
