use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use workaround_core::error::{AuthError, CoreError};
use workaround_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain, auth and storage errors and implements [`IntoResponse`] to
/// produce consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `workaround_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A signup / login / session failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A document store failure outside the auth flow.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const STORAGE_UNAVAILABLE_MESSAGE: &str = "Database not available";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- AuthError variants ---
            AppError::Auth(auth) => match auth {
                AuthError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                AuthError::EmailInUse => (
                    StatusCode::CONFLICT,
                    "EMAIL_IN_USE",
                    "Email already in use".to_string(),
                ),
                // Same body whether the email is unknown or the password is wrong.
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Invalid credentials".to_string(),
                ),
                AuthError::StorageUnavailable(msg) => {
                    tracing::error!(error = %msg, "Storage unavailable during authentication");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORAGE_UNAVAILABLE",
                        STORAGE_UNAVAILABLE_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unreachable backend maps to 503.
/// - Unique index violations map to 409.
/// - Malformed or unencodable documents map to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "Document store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                STORAGE_UNAVAILABLE_MESSAGE.to_string(),
            )
        }
        StoreError::Duplicate { index } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique index: {index}"),
        ),
        other => {
            tracing::error!(error = %other, "Document store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
