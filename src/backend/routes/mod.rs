//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation, middleware and fallback
//! - **`api_routes`** - The user endpoints and the health check
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use authgate::backend::routes::create_router;
//! use authgate::backend::middleware::ExemptPaths;
//! use authgate::backend::server::{config::connect_in_memory, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = connect_in_memory().await?;
//! let state = AppState::new(
//!     pool,
//!     b"an-example-secret-of-32-bytes-or-more",
//!     ExemptPaths::default(),
//!     chrono::Duration::hours(1),
//! );
//! let router = create_router(state);
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
