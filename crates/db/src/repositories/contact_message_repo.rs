//! Repository for the `contactmessage` collection.

use workaround_core::collections::CONTACT_MESSAGES;
use workaround_core::types::DocumentId;

use crate::models::contact_message::ContactMessage;
use crate::store::{encode_record, DocumentStore, StoreError};

pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Record a contact form submission, returning its id.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &ContactMessage,
    ) -> Result<DocumentId, StoreError> {
        store
            .insert_one(CONTACT_MESSAGES, encode_record(input)?)
            .await
    }
}
