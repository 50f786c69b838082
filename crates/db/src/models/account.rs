//! Account record and creation DTO (collection `user`).

use serde::{Deserialize, Serialize};
use workaround_core::roles::DEFAULT_ROLE;
use workaround_core::types::DocumentId;

/// A stored account.
///
/// Contains the password hash and salt -- NEVER serialize this to API
/// responses. Older documents may lack `role` or `is_active`; those default
/// to `"worker"` and `true`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(skip)]
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// DTO for inserting a new account. The password is already hashed.
#[derive(Debug, Serialize)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub avatar: Option<String>,
    pub role: String,
    pub is_active: bool,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_active() -> bool {
    true
}
