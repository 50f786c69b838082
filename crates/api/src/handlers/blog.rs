//! Handlers for the marketing blog feed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use workaround_core::blog::{validate_slug, FEED_LIMIT};
use workaround_core::types::{DocumentId, Timestamp};
use workaround_db::models::blog_post::BlogPost;
use workaround_db::repositories::BlogPostRepo;

use super::validate_request;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /blog`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub slug: String,
    #[validate(length(max = 500))]
    pub excerpt: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(url)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: Option<Timestamp>,
    pub author: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedId {
    pub id: DocumentId,
}

/// GET /api/v1/blog
///
/// Up to 20 posts in insertion order.
pub async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogPost>>>> {
    let posts = BlogPostRepo::list(state.store.as_ref(), FEED_LIMIT).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/blog
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPostRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedId>>)> {
    validate_request(&input)?;
    validate_slug(&input.slug)?;

    let post = BlogPost {
        title: input.title.trim().to_string(),
        slug: input.slug,
        excerpt: input.excerpt,
        content: input.content,
        cover_image: input.cover_image,
        tags: input.tags,
        published_at: input.published_at,
        author: input.author,
    };
    let id = BlogPostRepo::create(state.store.as_ref(), &post).await?;
    tracing::info!(post_id = %id, slug = %post.slug, "Blog post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: CreatedId { id } })))
}
