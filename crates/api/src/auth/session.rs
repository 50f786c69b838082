//! Opaque session tokens.
//!
//! A token is 24 random bytes, hex encoded. It carries no structure and is
//! valid only because a matching record exists in the `session` collection.

use chrono::{Duration, Utc};
use rand::RngCore;
use workaround_core::error::AuthError;
use workaround_core::types::Timestamp;
use workaround_db::models::session::{CreateSession, Session};
use workaround_db::repositories::SessionRepo;
use workaround_db::DocumentStore;

use super::storage_unavailable;

/// Random bytes per token (48 hex characters).
pub const TOKEN_BYTES: usize = 24;

/// Mint a new unpredictable session token.
pub fn mint_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Record `token` as a session owned by `owner_id`, stamped with the current
/// UTC time.
///
/// The owner is not checked for existence here.
pub async fn create_session(
    store: &dyn DocumentStore,
    owner_id: &str,
    token: String,
) -> Result<Session, AuthError> {
    let input = CreateSession {
        owner_id: owner_id.to_string(),
        token,
        created_at: Utc::now(),
    };
    SessionRepo::create(store, &input)
        .await
        .map_err(storage_unavailable)
}

/// How long a session token is honoured after creation.
///
/// `ttl: None` means tokens never expire and stay valid until the record is
/// removed from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl: Option<Duration>,
}

impl SessionPolicy {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }

    /// `true` if the session is past its TTL at `now`.
    pub fn is_expired(&self, session: &Session, now: Timestamp) -> bool {
        match self.ttl {
            Some(ttl) => session.created_at + ttl <= now,
            None => false,
        }
    }
}
