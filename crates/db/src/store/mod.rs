//! The document store contract and its backends.
//!
//! A store holds JSON object documents grouped into named collections. Callers
//! never see the backend; they receive an `Arc<dyn DocumentStore>` at startup
//! and pass `&dyn DocumentStore` to the repositories.

mod memory;
mod postgres;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use workaround_core::types::DocumentId;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Equality filter on top-level document fields. An empty filter matches
/// every document in the collection.
pub type Filter = serde_json::Map<String, Value>;

/// Build a single-field equality filter.
pub fn filter_eq(field: &str, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(field.to_string(), value.into());
    filter
}

/// A stored document: the id assigned on insert plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub body: Value,
}

impl Document {
    /// Deserialize the body into a typed record.
    ///
    /// Missing required fields or mistyped values become
    /// [`StoreError::Malformed`] naming the collection and document id.
    pub fn decode<T: DeserializeOwned>(self, collection: &str) -> Result<(DocumentId, T), StoreError> {
        match serde_json::from_value(self.body) {
            Ok(record) => Ok((self.id, record)),
            Err(e) => Err(StoreError::Malformed {
                collection: collection.to_string(),
                id: self.id,
                reason: e.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or failed while executing.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// An insert collided with a unique index.
    #[error("Duplicate value violates unique index {index}")]
    Duplicate { index: String },

    /// A stored document does not match the record type it was read as.
    #[error("Malformed {collection} document {id}: {reason}")]
    Malformed {
        collection: String,
        id: DocumentId,
        reason: String,
    },

    /// A record could not be converted into a JSON object for insertion.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let index = db_err.constraint().unwrap_or("unknown");
                if index.starts_with("uq_") {
                    return StoreError::Duplicate {
                        index: index.to_string(),
                    };
                }
            }
        }
        StoreError::Unavailable(err.to_string())
    }
}

/// Collection-oriented persistence used by every repository.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return the oldest document in `collection` matching `filter`.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError>;

    /// Fetch a document by id. Ids that are not valid for the backend
    /// simply match nothing.
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Return up to `limit` matching documents in insertion order.
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    /// Insert a JSON object and return its generated id.
    async fn insert_one(&self, collection: &str, record: Value) -> Result<DocumentId, StoreError>;

    /// Names of collections holding at least one document, sorted.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Cheap reachability probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Serialize a record and check that it is a JSON object.
pub fn encode_record<T: serde::Serialize>(record: &T) -> Result<Value, StoreError> {
    let value =
        serde_json::to_value(record).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
    if !value.is_object() {
        return Err(StoreError::InvalidDocument(
            "document body must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

/// `true` when every filter field is present in `body` with an equal value.
pub(crate) fn matches(body: &Value, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, expected)| body.get(field) == Some(expected))
}
