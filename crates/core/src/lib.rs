//! Domain logic for the restring platform.
//!
//! Everything in this crate is pure: no database access, no I/O, no shared
//! mutable state. The `db` and `api` crates depend on it; it depends on
//! nothing internal.

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod lifecycle;
pub mod notes;
pub mod resolve;
pub mod types;
