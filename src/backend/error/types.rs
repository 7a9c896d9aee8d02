/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers and by the
 * authentication middleware.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Domain refusals with an explicit status: duplicate registration, unknown
 * account, wrong password, malformed request body, missing profile.
 *
 * ## Authentication Errors
 *
 * Token and header failures. These always render as the same generic 401 so
 * the client cannot tell an expired token from a forged one.
 *
 * ## Internal Errors
 *
 * Datastore, hashing and token encoding failures. These render
 * as 500 with a fixed message; the detail goes to the log only.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::{AuthError, TokenError};

/// Message returned for every authentication failure
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized, please login again";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use authgate::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::FORBIDDEN, "User already exists");
/// assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status and client-facing message
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Authentication failure; the kind is for logs only
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Datastore failure
    #[error("Database error: {0}")]
    DatastoreError(#[from] sqlx::Error),

    /// Password hashing or verification failure
    #[error(transparent)]
    PasswordError(#[from] PasswordError),

    /// Token issuance failure
    #[error(transparent)]
    TokenError(#[from] TokenError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Unauthorized` - 401 Unauthorized
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::DatastoreError(_)
            | Self::PasswordError(_)
            | Self::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal detail never appears here; use the `Display` impl for logs.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized(_) => UNAUTHORIZED_MESSAGE.to_string(),
            Self::DatastoreError(_) => "Database error".to_string(),
            Self::PasswordError(_) | Self::TokenError(_) => "Server error".to_string(),
        }
    }
}

/// Every body rejection (syntax, missing field, wrong content type) is a 400
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}
