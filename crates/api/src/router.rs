//! Router and middleware for the Workaround API.
//!
//! The binary and the integration tests both call [`build_app_router`], so
//! tests run against the same CORS, request-id and timeout behaviour as the
//! server.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{ServerConfig, ANY_ORIGIN};
use crate::routes;
use crate::state::AppState;

/// Build the Workaround API [`Router`].
///
/// `GET /` and `GET /health` sit at the root; everything else is under
/// `/api/v1`. Requests pass CORS first, then get an `x-request-id` (echoed on
/// the response) and a trace span, and are cut off after
/// `REQUEST_TIMEOUT_SECS` with 408. A panicking handler becomes a 500.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        // Outermost layer last.
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// CORS for `GET`/`POST` with `Content-Type` and `Authorization` headers.
///
/// A `*` entry in `CORS_ORIGINS` answers with `Access-Control-Allow-Origin: *`
/// and no credentials. An explicit origin list is echoed back with
/// credentials allowed. Unparseable entries never get here; `ServerConfig`
/// rejects them at load time.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter(|o| o.as_str() != ANY_ORIGIN)
        .filter_map(|o| o.parse().ok())
        .collect();

    layer.allow_origin(origins).allow_credentials(true)
}
