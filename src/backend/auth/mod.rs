//! Authentication Module
//!
//! This module handles user registration, login, and token management.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt credential hashing
//! - **`sessions`** - token issuing and verification
//! - **`users`** - user data model and database operations
//! - **`handlers`** - HTTP handlers for the user endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - Credential hasher
//! ├── sessions.rs     - Token issuer and verifier
//! ├── users.rs        - User model and database operations
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Registration handler
//!     ├── login.rs    - Login handler
//!     └── me.rs       - Profile and account deletion
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user created → token returned
//! 2. **Login**: email, password → hash verified → token returned
//! 3. **Me**: token verified by the middleware → profile returned
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::Duration;
//! use authgate::backend::auth::{SigningKey, TokenIssuer, TokenVerifier};
//!
//! let key = Arc::new(SigningKey::from_secret(b"an-example-secret-of-32-bytes-or-more"));
//! let issuer = TokenIssuer::new(key.clone());
//! let verifier = TokenVerifier::new(key);
//!
//! let token = issuer.issue("ada@example.com", Duration::hours(1)).unwrap();
//! assert_eq!(verifier.verify_token(&token).unwrap(), "ada@example.com");
//! ```

/// Credential hashing
pub mod password;

/// Token issuing and verification
pub mod sessions;

/// User data model and database operations
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse};
pub use handlers::{delete_me, get_me, login, register};
pub use password::{hash_password, verify_password, PasswordError, HASH_COST};
pub use sessions::{AuthError, Claims, SigningKey, TokenError, TokenIssuer, TokenVerifier};
pub use users::{User, UserProfile};
