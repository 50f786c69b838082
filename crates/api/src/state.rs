use std::sync::Arc;

use workaround_db::DocumentStore;

use crate::auth::AuthService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store shared by every repository call.
    pub store: Arc<dyn DocumentStore>,
    /// Signup, login and token validation over the same store.
    pub auth: AuthService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Arc<ServerConfig>) -> Self {
        let auth = AuthService::new(Arc::clone(&store), config.session_policy());
        Self {
            store,
            auth,
            config,
        }
    }
}
