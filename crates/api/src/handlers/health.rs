//! Service banner and health check.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Maximum number of collection names reported by the health check.
const MAX_REPORTED_COLLECTIONS: usize = 10;

#[derive(Serialize)]
pub struct BannerResponse {
    pub name: &'static str,
    pub message: &'static str,
    pub tagline: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the document store is reachable.
    pub db_healthy: bool,
    /// Up to ten collection names known to the store.
    pub collections: Vec<String>,
}

/// GET /
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        name: "Workaround.io",
        message: "API running",
        tagline: "Don't work around the clock.",
    })
}

/// GET /health -- returns service and document store health.
///
/// Always 200; an unreachable store reports `"degraded"`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: document store unreachable");
            false
        }
    };

    let collections = if db_healthy {
        match state.store.list_collections().await {
            Ok(mut names) => {
                names.truncate(MAX_REPORTED_COLLECTIONS);
                names
            }
            Err(e) => {
                tracing::warn!(error = %e, "Health check: listing collections failed");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        collections,
    })
}
