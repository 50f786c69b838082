//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&dyn DocumentStore` as the first argument and map documents to the typed
//! records in [`crate::models`].

pub mod account_repo;
pub mod blog_post_repo;
pub mod contact_message_repo;
pub mod session_repo;

pub use account_repo::AccountRepo;
pub use blog_post_repo::BlogPostRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use session_repo::SessionRepo;
