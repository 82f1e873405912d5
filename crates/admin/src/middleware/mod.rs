//! HTTP middleware for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, `routes::with_error_tracking`)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//! 4. Session layer (tower-sessions with an in-memory store)
//!
//! Authentication is an extractor ([`RequireAdminAuth`], or
//! [`RequireDeleteRole`] for deletes) rather than a layer, so each handler
//! states what it needs.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, RequireDeleteRole, clear_current_admin, set_current_admin};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
