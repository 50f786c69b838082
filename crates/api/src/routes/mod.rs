pub mod auth;
pub mod blog;
pub mod contact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current account (requires auth)
///
/// /blog                                            list (GET), create (POST)
///
/// /contact                                         submit (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(blog::router())
        .merge(contact::router())
}
