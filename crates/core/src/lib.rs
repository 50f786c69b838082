//! Domain types shared by the Workaround storage and HTTP crates.
//!
//! Nothing in this crate performs I/O.

pub mod blog;
pub mod collections;
pub mod error;
pub mod roles;
pub mod types;
