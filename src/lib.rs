//! Client for a task-tracking API that authenticates with a salted
//! challenge-response login and signs every protected request.
//!
//! The [`TodoClient`] facade owns a [`ClientContext`] holding the session,
//! the task cache and the sort state. Every protected call goes through the
//! [`TokenSigner`], which mixes a fresh nonce and a skew-corrected timestamp
//! into a SHA-512 token so the password hash itself never leaves the client.
//!
//! ```rust,ignore
//! use todo_client::{ClientConfig, TodoClient, SortField};
//!
//! let client = TodoClient::connect(ClientConfig::from_env()?)?;
//! client.login("a@b.com", "pw").await?;
//! client.create_task("write the report", 4).await?;
//! client.sort_by(SortField::Priority);
//! for task in client.tasks() {
//!     println!("{} {}", task.priority, task.text);
//! }
//! ```

pub mod actions;
pub mod api;
pub mod clock;
pub mod config;
pub mod context;
pub mod crypto;
pub mod events;
pub mod secret;
pub mod session;
pub mod signer;
pub mod tasks;
pub mod transport;
pub mod validators;

mod client;

use std::fmt;

pub use client::TodoClient;
pub use clock::{Clock, ClockSkew, SystemClock};
pub use config::ClientConfig;
pub use context::{AuthState, ClientContext, View};
pub use secret::SecretString;
pub use session::{AccountFields, Session, SessionStore};
pub use signer::{SignedQuery, TokenSigner};
pub use tasks::{SortController, SortField, Task, TaskCache};
pub use transport::{ApiRequest, ApiTransport, HttpTransport, Method};
pub use validators::ValidationError;

#[cfg(any(test, feature = "mocks"))]
pub use clock::ManualClock;
#[cfg(any(test, feature = "mocks"))]
pub use transport::MockTransport;

/// Errors returned by client operations.
///
/// The first four variants are the failure kinds of the protocol. The rest
/// are local conditions detected before anything is transmitted.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// A protected call was attempted without a verified session.
    Unauthenticated,
    /// The server rejected the login challenge or the password verification.
    AuthRejected(String),
    /// Network error or non-2xx HTTP status.
    TransportFailure(String),
    /// The call succeeded but the success marker was missing or not `"Success"`.
    OperationRejected {
        operation: &'static str,
        marker: Option<String>,
    },
    /// The response body could not be decoded.
    InvalidResponse(String),
    Validation(ValidationError),
    TaskNotFound(i64),
    /// Another mutation of the same task is still in flight.
    TaskBusy(i64),
    ConfigurationError(String),
}

impl std::error::Error for ClientError {}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Unauthenticated => write!(f, "Not logged in"),
            ClientError::AuthRejected(msg) => write!(f, "Authentication rejected: {}", msg),
            ClientError::TransportFailure(msg) => write!(f, "Request failed: {}", msg),
            ClientError::OperationRejected { operation, marker } => match marker {
                Some(marker) => write!(f, "{} was rejected by the server ({})", operation, marker),
                None => write!(f, "{} was rejected by the server", operation),
            },
            ClientError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ClientError::Validation(err) => write!(f, "Validation error: {}", err),
            ClientError::TaskNotFound(id) => write!(f, "Task #{} not found", id),
            ClientError::TaskBusy(id) => write!(f, "Task #{} has a pending change", id),
            ClientError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err)
    }
}

impl ClientError {
    /// True for the kinds that leave the task cache untouched and are shown
    /// to the user as a generic "could not ..." message.
    pub fn is_user_visible_failure(&self) -> bool {
        matches!(
            self,
            ClientError::TransportFailure(_) | ClientError::OperationRejected { .. }
        )
    }
}
