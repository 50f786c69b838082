//! Session record and creation DTO (collection `session`).

use serde::{Deserialize, Serialize};
use workaround_core::types::{DocumentId, Timestamp};

/// A stored session. Never modified after insertion.
///
/// The owning account id is persisted under the `user_id` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(skip)]
    pub id: DocumentId,
    #[serde(rename = "user_id")]
    pub owner_id: DocumentId,
    pub token: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new session.
#[derive(Debug, Serialize)]
pub struct CreateSession {
    #[serde(rename = "user_id")]
    pub owner_id: DocumentId,
    pub token: String,
    pub created_at: Timestamp,
}
