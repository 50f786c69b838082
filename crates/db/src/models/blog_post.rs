//! Marketing blog post record (collection `blogpost`).

use serde::{Deserialize, Serialize};
use workaround_core::types::Timestamp;

/// A blog post as stored and as returned by the feed.
///
/// `published_at` is `None` when the stored document omits it or holds null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub author: Option<String>,
}
