//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - the request authenticator: exempt-path policy, bearer token
//!   verification, typed identity propagation, JSON content type on every
//!   response

pub mod auth;

pub use auth::{
    auth_middleware, authenticate, AuthOutcome, AuthUser, AuthenticatedUser, ExemptPaths,
    DEFAULT_EXEMPT_PATHS,
};
