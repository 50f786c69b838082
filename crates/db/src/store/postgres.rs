use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use workaround_core::types::DocumentId;

use super::{Document, DocumentStore, Filter, StoreError};

/// Row shape shared by every `documents` query.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Value>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id.to_string(),
            body: row.body.0,
        }
    }
}

/// [`DocumentStore`] backed by the `documents` table.
///
/// Filters are evaluated with JSONB containment (`body @> filter`), which is
/// plain equality for the scalar fields the repositories filter on.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents
             WHERE collection = $1 AND body @> $2
             ORDER BY created_at, id
             LIMIT 1",
        )
        .bind(collection)
        .bind(Json(filter))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents
             WHERE collection = $1 AND body @> $2
             ORDER BY created_at, id
             LIMIT $3",
        )
        .bind(collection)
        .bind(Json(filter))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn insert_one(&self, collection: &str, record: Value) -> Result<DocumentId, StoreError> {
        if !record.is_object() {
            return Err(StoreError::InvalidDocument(
                "document body must be a JSON object".to_string(),
            ));
        }
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO documents (id, collection, body)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(Uuid::now_v7())
        .bind(collection)
        .bind(Json(&record))
        .fetch_one(&self.pool)
        .await?;
        Ok(id.to_string())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
