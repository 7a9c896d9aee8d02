//! Authentication Handlers
//!
//! HTTP handlers for the user endpoints.
//!
//! - **`signup`** - `POST /user/create`
//! - **`login`** - `POST /user/login`
//! - **`me`** - `GET /user/me` and `DELETE /user/me`
//! - **`types`** - request and response bodies

/// Request/response types
pub mod types;

/// Registration handler
pub mod signup;

/// Login handler
pub mod login;

/// Current user handlers
pub mod me;

pub use login::login;
pub use me::{delete_me, get_me};
pub use signup::register;
