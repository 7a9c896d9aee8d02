/**
 * API Route Handlers
 *
 * # Routes
 *
 * - `GET /` - Health check (exempt)
 * - `POST /user/create` - User registration (exempt)
 * - `POST /user/login` - User login (exempt)
 * - `GET /user/me` - Current user profile (requires authentication)
 * - `DELETE /user/me` - Delete current user (requires authentication)
 */

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::backend::auth::handlers::{delete_me, get_me, login, register};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Which of these need a token is decided by the exempt path list in
/// `AppState`, not here.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(health))
        .route("/user/create", post(register))
        .route("/user/login", post(login))
        .route("/user/me", get(get_me).delete(delete_me))
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
