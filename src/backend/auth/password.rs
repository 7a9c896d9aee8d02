/**
 * Credential Hashing
 *
 * bcrypt hashing and verification for account passwords. The work factor is a
 * compile-time constant; it bounds how fast an attacker holding the `users` table
 * can guess, and it is not adjustable at runtime.
 */

use bcrypt::BcryptError;
use thiserror::Error;

/// bcrypt work factor used for every stored hash
pub const HASH_COST: u32 = 14;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The hasher itself failed (randomness or worker failure)
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The stored value is not a bcrypt hash
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password with bcrypt at [`HASH_COST`]
pub fn hash_password(secret: &str) -> Result<String, PasswordError> {
    hash_with_cost(secret, HASH_COST)
}

pub(crate) fn hash_with_cost(secret: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(secret, cost).map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a password against a stored hash
///
/// A mismatch is `Ok(false)`, not an error. Only a hash that cannot be parsed
/// produces [`PasswordError::MalformedHash`].
pub fn verify_password(secret: &str, hashed: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(secret, hashed).map_err(|e| match e {
        BcryptError::InvalidCost(_)
        | BcryptError::InvalidPrefix(_)
        | BcryptError::InvalidHash(_)
        | BcryptError::InvalidSaltLen(_)
        | BcryptError::InvalidBase64(_) => PasswordError::MalformedHash(e.to_string()),
        other => PasswordError::Hashing(other.to_string()),
    })
}

/// [`hash_password`] on the blocking pool
///
/// A cost-14 hash takes long enough that running it on an async worker would
/// stall unrelated requests.
pub async fn hash_password_blocking(secret: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&secret))
        .await
        .map_err(|e| PasswordError::Hashing(format!("hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking pool
pub async fn verify_password_blocking(
    secret: String,
    hashed: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&secret, &hashed))
        .await
        .map_err(|e| PasswordError::Hashing(format!("verification task failed: {}", e)))?
}
