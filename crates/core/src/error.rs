#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Failures surfaced by signup, login and session validation.
///
/// `InvalidCredentials` deliberately covers both an unknown email and a wrong
/// password so callers cannot tell which one occurred.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already in use")]
    EmailInUse,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}
