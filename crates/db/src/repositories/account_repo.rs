//! Repository for the `user` collection.

use workaround_core::collections::ACCOUNTS;
use workaround_core::types::DocumentId;

use crate::models::account::{Account, CreateAccount};
use crate::store::{encode_record, filter_eq, Document, DocumentStore, StoreError};

/// Provides create and lookup operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning its id.
    ///
    /// Fails with [`StoreError::Duplicate`] when the store enforces email
    /// uniqueness and the email is taken.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &CreateAccount,
    ) -> Result<DocumentId, StoreError> {
        store.insert_one(ACCOUNTS, encode_record(input)?).await
    }

    /// `true` if any account document holds this email, whether or not it
    /// decodes cleanly.
    pub async fn email_exists(store: &dyn DocumentStore, email: &str) -> Result<bool, StoreError> {
        let doc = store.find_one(ACCOUNTS, &filter_eq("email", email)).await?;
        Ok(doc.is_some())
    }

    /// Find an account by its exact (already normalized) email.
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        let doc = store.find_one(ACCOUNTS, &filter_eq("email", email)).await?;
        doc.map(decode).transpose()
    }

    /// Find an account by id.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Account>, StoreError> {
        let doc = store.find_by_id(ACCOUNTS, id).await?;
        doc.map(decode).transpose()
    }
}

fn decode(doc: Document) -> Result<Account, StoreError> {
    let (id, mut account) = doc.decode::<Account>(ACCOUNTS)?;
    account.id = id;
    Ok(account)
}
