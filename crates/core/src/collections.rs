//! Document store collection names.
//!
//! These match the lowercase record names used by the existing data set, so
//! accounts live in `user` rather than `account`.

pub const ACCOUNTS: &str = "user";
pub const SESSIONS: &str = "session";
pub const BLOG_POSTS: &str = "blogpost";
pub const CONTACT_MESSAGES: &str = "contactmessage";
