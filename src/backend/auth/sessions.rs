/**
 * Session Tokens
 *
 * This module issues and verifies the HS256 tokens handed out by the
 * registration and login handlers. Tokens are stateless: nothing is stored
 * server-side, the signature and the `exp` claim decide validity. Issuing is
 * deterministic: the same subject, lifetime, instant and key give the same token.
 *
 * The signing key is built once at startup and shared read-only between the
 * issuer and the verifier through an `Arc`.
 */

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime in hours (five 30-day months)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 30 * 5;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the account email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Token verification failures
///
/// The kinds are kept apart for logging and tests. Clients only ever see a
/// generic unauthorized response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token has expired")]
    TokenExpired,
}

/// Token issuance failures
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Process-wide HMAC key shared by [`TokenIssuer`] and [`TokenVerifier`]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// Builds signed, time-bounded identity tokens
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>) -> Self {
        Self { key }
    }

    /// Issue a token for `subject` expiring `ttl` from now
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// A negative `ttl` yields a token that is already expired.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

/// Parses and validates tokens issued by [`TokenIssuer`]
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: Arc<SigningKey>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(key: Arc<SigningKey>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against a caller-supplied instant in `decode_at`.
        validation.validate_exp = false;

        Self { key, validation }
    }

    /// Verify an `Authorization` header value (`<scheme> <token>`)
    pub fn verify_credential(&self, header_value: &str) -> Result<String, AuthError> {
        self.verify_credential_at(header_value, Utc::now())
    }

    pub fn verify_credential_at(
        &self,
        header_value: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let token = bearer_token(header_value)?;
        self.verify_token_at(token, now)
    }

    /// Verify a bare token and return its subject
    pub fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        self.verify_token_at(token, Utc::now())
    }

    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        self.decode_at(token, now).map(|claims| claims.sub)
    }

    /// Decode a token, check its signature, then its expiry against `now`
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.key.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected by decoder: {:?}", e.kind());
                AuthError::InvalidSignature
            })?;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

/// Split `<scheme> <token>` on its single space separator
///
/// The scheme is not checked. Anything other than exactly two parts, or an
/// empty token part, is [`AuthError::MalformedHeader`].
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
