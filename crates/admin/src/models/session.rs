//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use souq_core::{AdminRole, AdminUserId};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Position of the account in the configured account list, 1-based.
    pub id: AdminUserId,
    /// Sign-in name.
    pub username: String,
    /// Admin's role/permission level.
    pub role: AdminRole,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
