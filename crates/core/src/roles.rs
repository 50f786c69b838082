//! Well-known role name constants.
//!
//! Roles are recorded on accounts but not enforced by any route.

pub const ROLE_WORKER: &str = "worker";
pub const ROLE_ADMIN: &str = "admin";

/// Role assigned to every account created through signup.
pub const DEFAULT_ROLE: &str = ROLE_WORKER;
