//! Typed records stored in the document collections.

pub mod account;
pub mod blog_post;
pub mod contact_message;
pub mod session;
