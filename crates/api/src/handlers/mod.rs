//! Request handlers.
//!
//! Handlers decode and validate the request body, delegate to
//! [`AuthService`](crate::auth::AuthService) or a repository in
//! `workaround_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod blog;
pub mod contact;
pub mod health;

use validator::Validate;
use workaround_core::error::CoreError;

use crate::error::AppError;

/// Run `validator` derive rules on a request body, reporting failures as a
/// 400 validation error.
pub(crate) fn validate_request<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}
