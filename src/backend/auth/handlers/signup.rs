/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /user/create.
 *
 * # Registration Process
 *
 * 1. Reject if the email is already registered
 * 2. Hash the password with bcrypt (cost 14, off the async workers)
 * 3. Insert the user
 * 4. Issue a token so the caller is logged in straight away
 *
 * # Security
 *
 * - Only the bcrypt hash is stored
 * - A concurrent registration for the same email loses on the UNIQUE
 *   constraint and gets the same 403 as the pre-check
 */
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::password::hash_password_blocking;
use crate::backend::auth::users::{create_user, get_user_by_email, is_unique_violation};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const REGISTERED_MESSAGE: &str = "User successfully created and logged in!";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If the body is not a valid registration request
/// * `403 Forbidden` - If the email is already registered
/// * `500 Internal Server Error` - If hashing, the database, or token issuance fails
///
/// # Example Request
///
/// ```http
/// POST /user/create HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "Ada", "email": "ada@example.com", "pass": "correct horse"}
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> BackendResult<Json<RegisterResponse>> {
    let Json(request) = payload?;
    tracing::info!("Registration request for: {}", request.email);

    if get_user_by_email(&state.db_pool, &request.email)
        .await?
        .is_some()
    {
        tracing::warn!("Registration refused, email taken: {}", request.email);
        return Err(BackendError::handler(StatusCode::FORBIDDEN, USER_EXISTS_MESSAGE));
    }

    let hash_pass = hash_password_blocking(request.pass).await?;

    let user = create_user(&state.db_pool, &request.name, &request.email, &hash_pass)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Registration lost insert race: {}", request.email);
                BackendError::handler(StatusCode::FORBIDDEN, USER_EXISTS_MESSAGE)
            } else {
                BackendError::from(e)
            }
        })?;

    let token = state.issuer.issue(&user.email, state.token_ttl)?;

    tracing::info!("User registered: {} (id {})", user.email, user.id);

    Ok(Json(RegisterResponse {
        description: REGISTERED_MESSAGE.to_string(),
        token,
        status_code: StatusCode::OK.as_u16().to_string(),
    }))
}
