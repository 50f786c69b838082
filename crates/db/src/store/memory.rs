use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;
use workaround_core::collections;
use workaround_core::types::DocumentId;

use super::{matches, Document, DocumentStore, Filter, StoreError};

/// A unique constraint on one top-level field of one collection.
#[derive(Debug, Clone)]
struct UniqueIndex {
    name: String,
    collection: String,
    field: String,
}

/// Process-local document store for development and tests.
///
/// Unique indexes are opt-in, mirroring the Postgres migration via
/// [`MemoryDocumentStore::with_default_indexes`]. The store can be switched
/// offline with [`MemoryDocumentStore::set_available`] to exercise
/// storage-failure paths.
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    unique_indexes: Vec<UniqueIndex>,
    available: AtomicBool,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    /// An empty store with no unique indexes.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            unique_indexes: Vec::new(),
            available: AtomicBool::new(true),
        }
    }

    /// An empty store with the same unique indexes as the Postgres schema.
    pub fn with_default_indexes() -> Self {
        Self::new()
            .with_unique_index(collections::ACCOUNTS, "email")
            .with_unique_index(collections::SESSIONS, "token")
    }

    /// Reject inserts whose `field` value already exists in `collection`.
    pub fn with_unique_index(mut self, collection: &str, field: &str) -> Self {
        self.unique_indexes.push(UniqueIndex {
            name: format!("uq_documents_{collection}_{field}"),
            collection: collection.to_string(),
            field: field.to_string(),
        });
        self
    }

    /// Toggle reachability. While unavailable every operation fails with
    /// [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        self.ensure_available()?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(&doc.body, filter)))
            .cloned())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.ensure_available()?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        self.ensure_available()?;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(&doc.body, filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, record: Value) -> Result<DocumentId, StoreError> {
        self.ensure_available()?;
        if !record.is_object() {
            return Err(StoreError::InvalidDocument(
                "document body must be a JSON object".to_string(),
            ));
        }

        // Check and insert under one write lock so the indexes hold.
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection.to_string()).or_default();

        for index in self
            .unique_indexes
            .iter()
            .filter(|index| index.collection == collection)
        {
            let Some(value) = record.get(&index.field) else {
                continue;
            };
            if docs.iter().any(|doc| doc.body.get(&index.field) == Some(value)) {
                return Err(StoreError::Duplicate {
                    index: index.name.clone(),
                });
            }
        }

        let id = Uuid::now_v7().to_string();
        docs.push(Document {
            id: id.clone(),
            body: record,
        });
        Ok(id)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_available()?;
        let guard = self.collections.read().await;
        let mut names: Vec<String> = guard
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_available()
    }
}
