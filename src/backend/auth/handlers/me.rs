/**
 * Current User Handlers
 *
 * `GET /user/me` returns the caller's profile and `DELETE /user/me` removes
 * the caller's account. Both read the subject placed in the request by the
 * auth middleware; neither looks at the `Authorization` header itself.
 */

use axum::{extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::MeResponse;
use crate::backend::auth::users::{delete_user_by_email, get_profile_by_email};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::auth::AuthUser;

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If no authenticated identity is attached
/// * `404 Not Found` - If the token's subject has no row (e.g. deleted account)
/// * `500 Internal Server Error` - If the database query fails
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<MeResponse>> {
    let profile = get_profile_by_email(&pool, &user.subject)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", user.subject);
            BackendError::handler(StatusCode::NOT_FOUND, USER_NOT_FOUND_MESSAGE)
        })?;

    Ok(Json(MeResponse { me: profile }))
}

/// Delete current user handler
///
/// Idempotent: deleting an already-deleted account is still 204. Tokens
/// issued for the account stay valid until expiry but `GET /user/me` then
/// answers 404.
pub async fn delete_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> BackendResult<StatusCode> {
    let removed = delete_user_by_email(&pool, &user.subject).await?;
    tracing::info!(removed, "Deleted account: {}", user.subject);

    Ok(StatusCode::NO_CONTENT)
}
