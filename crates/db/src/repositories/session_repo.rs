//! Repository for the `session` collection.

use workaround_core::collections::SESSIONS;

use crate::models::session::{CreateSession, Session};
use crate::store::{encode_record, filter_eq, DocumentStore, StoreError};

/// Provides insert and token lookup for sessions. Sessions are never updated.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the stored record.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &CreateSession,
    ) -> Result<Session, StoreError> {
        let id = store.insert_one(SESSIONS, encode_record(input)?).await?;
        Ok(Session {
            id,
            owner_id: input.owner_id.clone(),
            token: input.token.clone(),
            created_at: input.created_at,
        })
    }

    /// Find a session by its opaque token.
    pub async fn find_by_token(
        store: &dyn DocumentStore,
        token: &str,
    ) -> Result<Option<Session>, StoreError> {
        let Some(doc) = store.find_one(SESSIONS, &filter_eq("token", token)).await? else {
            return Ok(None);
        };
        let (id, mut session) = doc.decode::<Session>(SESSIONS)?;
        session.id = id;
        Ok(Some(session))
    }
}
