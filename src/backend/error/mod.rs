//! Backend Error Module
//!
//! This module defines the error type used by HTTP handlers and the
//! authentication middleware, and its conversion to JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`. Authentication failures of every
//! kind collapse into one generic 401 body; internal failures collapse into a
//! fixed 500 message. Only the log sees the underlying cause.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, UNAUTHORIZED_MESSAGE};

/// Result type alias for handlers
pub type BackendResult<T> = Result<T, BackendError>;
