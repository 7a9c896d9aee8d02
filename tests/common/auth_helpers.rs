//! Authentication test helpers
//!
//! Provides utilities for creating test users, generating tokens,
//! and building the application around a test database.

use authgate::backend::auth::sessions::{SigningKey, TokenIssuer};
use authgate::backend::auth::users::create_user;
use authgate::backend::middleware::ExemptPaths;
use authgate::backend::routes::create_router;
use authgate::backend::server::AppState;
use axum::Router;
use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// Hashes for directly inserted users use the minimum cost; the handler path
/// still hashes at the production cost.
const FIXTURE_COST: u32 = 4;

/// Test user credentials
pub struct TestUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Application state over `pool` with the default exempt list
pub fn test_state(pool: &SqlitePool) -> AppState {
    AppState::new(
        pool.clone(),
        TEST_SECRET,
        ExemptPaths::default(),
        Duration::hours(1),
    )
}

/// Router over `pool` with the default exempt list
pub fn test_app(pool: &SqlitePool) -> Router {
    create_router(test_state(pool))
}

/// Issuer signing with [`TEST_SECRET`]
pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(Arc::new(SigningKey::from_secret(TEST_SECRET)))
}

/// Token for `email` valid for an hour
pub fn generate_test_token(email: &str) -> String {
    test_issuer()
        .issue(email, Duration::hours(1))
        .expect("Failed to generate test token")
}

/// Create a user row directly and a token for it
pub async fn create_test_user(pool: &SqlitePool, name: &str, email: &str, password: &str) -> TestUser {
    let hash = bcrypt::hash(password, FIXTURE_COST).expect("Failed to hash password");
    let user = create_user(pool, name, email, &hash)
        .await
        .expect("Failed to create user");

    TestUser {
        name: user.name,
        token: generate_test_token(&user.email),
        email: user.email,
        password: password.to_string(),
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
