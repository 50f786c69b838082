//! Authentication primitives and orchestration.
//!
//! - [`password`] -- PBKDF2-HMAC-SHA256 password hashing and verification.
//! - [`session`] -- opaque session token minting and persistence.
//! - [`service`] -- signup, login and token validation against the document store.

pub mod password;
pub mod service;
pub mod session;

pub use service::{AuthService, AuthSession, AuthenticatedAccount};
pub use session::SessionPolicy;

use workaround_core::error::AuthError;
use workaround_db::StoreError;

/// Collapse any document store failure into [`AuthError::StorageUnavailable`].
pub(crate) fn storage_unavailable(err: StoreError) -> AuthError {
    tracing::error!(error = %err, "Document store failure during authentication");
    AuthError::StorageUnavailable(err.to_string())
}
