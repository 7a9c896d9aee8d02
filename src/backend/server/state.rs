/**
 * Application State Management
 *
 * This module defines the application state structure. Handlers that only
 * need the pool extract `State<SqlitePool>` through `FromRef`.
 *
 * # Thread Safety
 *
 * Nothing in `AppState` is mutated after startup:
 * - `SqlitePool` is internally synchronised
 * - the issuer and verifier share one `Arc<SigningKey>`
 * - the exempt list sits behind an `Arc`
 */

use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::{SigningKey, TokenIssuer, TokenVerifier};
use crate::backend::middleware::auth::ExemptPaths;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler and the auth middleware
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,
    /// Token issuer used by registration and login
    pub issuer: TokenIssuer,
    /// Token verifier used by the auth middleware
    pub verifier: TokenVerifier,
    /// Paths that bypass authentication
    pub exempt_paths: Arc<ExemptPaths>,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
}

impl AppState {
    /// Build state around an existing pool
    ///
    /// The signing key is created here, once, and shared by the issuer and
    /// the verifier.
    pub fn new(
        db_pool: SqlitePool,
        jwt_secret: &[u8],
        exempt_paths: ExemptPaths,
        token_ttl: Duration,
    ) -> Self {
        let key = Arc::new(SigningKey::from_secret(jwt_secret));

        Self {
            db_pool,
            issuer: TokenIssuer::new(key.clone()),
            verifier: TokenVerifier::new(key),
            exempt_paths: Arc::new(exempt_paths),
            token_ttl,
        }
    }

    pub fn from_config(db_pool: SqlitePool, config: &ServerConfig) -> Self {
        Self::new(
            db_pool,
            config.jwt_secret.as_bytes(),
            config.exempt_paths.clone(),
            config.token_ttl,
        )
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
