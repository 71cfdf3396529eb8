mod store;

pub use store::SessionStore;

use serde::Deserialize;

use crate::clock::ClockSkew;
use crate::SecretString;

/// Account fields as sent by the `/auth/` and `/account/{id}` endpoints.
///
/// Every field is optional because each endpoint returns a different
/// subset. There is deliberately no password field: the password hash is
/// derived on the client and no server response may replace it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountFields {
    #[serde(rename = "Id")]
    pub id: Option<i64>,
    #[serde(rename = "AccountId")]
    pub account_id: Option<i64>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Salt")]
    pub salt: Option<String>,
    #[serde(rename = "Role")]
    pub role: Option<String>,
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<i64>,
    #[serde(rename = "LastAuth")]
    pub last_auth: Option<i64>,
}

/// The logged-in identity and the material needed to sign requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    /// hex SHA-512 of `salt || password`; `None` until the challenge was answered.
    pub password_hash: Option<SecretString>,
    pub salt: String,
    /// Server time reported by the challenge response.
    pub issued_at: i64,
    pub clock_skew: ClockSkew,
    pub last_auth_at: i64,
    authenticated: bool,
}

impl Session {
    /// True once both login round-trips succeeded, until reset.
    pub fn is_valid(&self) -> bool {
        self.authenticated
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    /// Merges a server record into the session. Absent fields are left as they are.
    pub fn apply_server_fields(&mut self, fields: &AccountFields) {
        if let Some(id) = fields.id {
            self.id = id;
        }
        if let Some(account_id) = fields.account_id {
            self.account_id = account_id;
        }
        if let Some(name) = &fields.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &fields.email {
            self.email.clone_from(email);
        }
        if let Some(salt) = &fields.salt {
            self.salt.clone_from(salt);
        }
        if let Some(role) = &fields.role {
            self.role.clone_from(role);
        }
        if let Some(timestamp) = fields.timestamp {
            self.issued_at = timestamp;
        }
        if let Some(last_auth) = fields.last_auth {
            self.last_auth_at = last_auth;
        }
    }
}
