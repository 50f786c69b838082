//! Route definitions for the blog feed.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// ```text
/// GET  /blog    -> list_posts
/// POST /blog    -> create_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/blog", get(blog::list_posts).post(blog::create_post))
}
