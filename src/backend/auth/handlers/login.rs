/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /user/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Issue a token for the email
 *
 * Unknown email and wrong password get different statuses (403 and 401).
 */
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::password::verify_password_blocking;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

pub const UNKNOWN_USER_MESSAGE: &str = "User does not exist";
pub const WRONG_PASSWORD_MESSAGE: &str = "Password does not match";
pub const LOGGED_IN_MESSAGE: &str = "User created and logged in successfully";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body is not a valid login request
/// * `403 Forbidden` - If no user has this email
/// * `401 Unauthorized` - If the password does not match
/// * `500 Internal Server Error` - If the database, hash check, or token issuance fails
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "description": "User created and logged in successfully"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> BackendResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&state.db_pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            BackendError::handler(StatusCode::FORBIDDEN, UNKNOWN_USER_MESSAGE)
        })?;

    let valid = verify_password_blocking(request.pass, user.hash_pass).await?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.email);
        return Err(BackendError::handler(
            StatusCode::UNAUTHORIZED,
            WRONG_PASSWORD_MESSAGE,
        ));
    }

    let token = state.issuer.issue(&user.email, state.token_ttl)?;

    tracing::info!("User logged in successfully: {}", user.email);

    Ok(Json(LoginResponse {
        token,
        description: LOGGED_IN_MESSAGE.to_string(),
    }))
}
