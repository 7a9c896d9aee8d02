//! authgate - Main Library
//!
//! A small account service: users register with a name, email and password,
//! log in to receive a signed token, and present that token to read or delete
//! their profile.
//!
//! # Overview
//!
//! - **Credential hashing**: bcrypt at a fixed work factor
//! - **Token issuing**: HS256 tokens carrying the account email as subject
//! - **Token verification**: signature first, then expiry
//! - **Request authentication**: Axum middleware with an exact-match exempt
//!   list, attaching the verified subject to each request
//!
//! # Module Structure
//!
//! - **`backend`** - The server
//!   - `auth` - hashing, tokens, user storage, handlers
//!   - `middleware` - the request authenticator
//!   - `routes` - router assembly
//!   - `server` - configuration, state, startup
//!   - `error` - handler errors and their JSON form
//!
//! # Usage
//!
//! ```rust,no_run
//! use authgate::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Handlers return `BackendResult<T>`; every failure leaves as a JSON body
//! `{"error": ..., "status": ...}`. Authentication failures of any kind share
//! one generic 401 message.

/// Backend server-side code
pub mod backend;
