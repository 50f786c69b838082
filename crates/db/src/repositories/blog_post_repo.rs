//! Repository for the `blogpost` collection.

use workaround_core::collections::BLOG_POSTS;
use workaround_core::types::DocumentId;

use crate::models::blog_post::BlogPost;
use crate::store::{encode_record, DocumentStore, Filter, StoreError};

pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a post, returning its id.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &BlogPost,
    ) -> Result<DocumentId, StoreError> {
        store.insert_one(BLOG_POSTS, encode_record(input)?).await
    }

    /// List up to `limit` posts in insertion order.
    pub async fn list(store: &dyn DocumentStore, limit: i64) -> Result<Vec<BlogPost>, StoreError> {
        let docs = store.find_many(BLOG_POSTS, &Filter::new(), limit).await?;
        docs.into_iter()
            .map(|doc| doc.decode::<BlogPost>(BLOG_POSTS).map(|(_, post)| post))
            .collect()
    }
}
