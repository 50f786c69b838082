//! Handlers for the `/auth` resource (signup, login, me).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthSession, AuthenticatedAccount};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Opaque session token, sent back as `Authorization: Bearer <token>`.
    pub token: String,
    pub name: String,
    pub email: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            name: session.name,
            email: session.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account and return a session token for it.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state
        .auth
        .signup(&input.name, &input.email, &input.password)
        .await?;
    Ok(Json(session.into()))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Every successful login opens a new
/// session; earlier tokens stay valid.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state.auth.login(&input.email, &input.password).await?;
    Ok(Json(session.into()))
}

/// GET /api/v1/auth/me
///
/// Return the account that owns the presented session token.
pub async fn me(user: AuthUser) -> AppResult<Json<DataResponse<AuthenticatedAccount>>> {
    Ok(Json(DataResponse {
        data: AuthenticatedAccount {
            id: user.account_id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    }))
}
