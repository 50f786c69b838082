//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- resolves a Bearer session token to its account.

pub mod auth;
