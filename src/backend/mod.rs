//! Backend Module
//!
//! This module contains all server-side code: an Axum HTTP server with
//! user registration, login and profile endpoints behind token
//! authentication.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, tokens, user storage, handlers
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! request -> TraceLayer -> auth_middleware -> handler | 404 fallback
//!                              |
//!                              +-> 401 {"error": "unauthorized, please login again"}
//! ```
//!
//! # Thread Safety
//!
//! `AppState` is immutable after startup. The pool is internally
//! synchronised, the signing key is shared through an `Arc`, and bcrypt work
//! runs on the blocking pool.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::create_app;
