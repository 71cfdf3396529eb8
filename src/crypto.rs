use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha512};

use crate::SecretString;

/// Length of the per-request nonce (`rSalt`).
pub const NONCE_LENGTH: usize = 16;

/// Hex length of a SHA-512 digest.
pub const TOKEN_HEX_LENGTH: usize = 128;

/// Generates a random nonce for one signed request.
///
/// Characters are drawn uniformly from `[A-Za-z0-9]`, so the nonce is safe
/// to place in a query string without escaping.
///
/// ```rust
/// use todo_client::crypto::generate_nonce;
///
/// let nonce = generate_nonce(16);
/// assert_eq!(nonce.len(), 16);
/// assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_nonce(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Derives the account password hash: hex SHA-512 of `salt || password`.
///
/// This is the value the server stores; the client signs with it and never
/// transmits it.
pub fn hash_password(salt: &str, password: &SecretString) -> SecretString {
    let mut hasher = Sha512::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.expose_secret().as_bytes());
    SecretString::new(hex::encode(hasher.finalize()))
}

/// Computes the request token: hex SHA-512 of `timestamp || nonce || password_hash`.
///
/// The timestamp is rendered as decimal seconds, exactly as sent in `rTimestamp`.
pub fn request_token(timestamp: i64, nonce: &str, password_hash: &SecretString) -> String {
    let mut hasher = Sha512::new();
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(password_hash.expose_secret().as_bytes());
    hex::encode(hasher.finalize())
}
