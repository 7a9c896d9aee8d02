/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Build the signing key, token issuer and verifier
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns the database error if the pool cannot be opened or migrated.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing authgate backend server");

    let db_pool = load_database(&config.database_url).await?;

    let app_state = AppState::from_config(db_pool, config);
    tracing::info!(
        exempt_paths = app_state.exempt_paths.len(),
        token_ttl_hours = app_state.token_ttl.num_hours(),
        "Application state created"
    );

    Ok(create_router(app_state))
}
