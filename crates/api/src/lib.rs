//! HTTP API for the restring platform.
//!
//! Thin axum layer over `restring-core` (domain logic) and `restring-db`
//! (persistence): handlers validate input, orchestrate repository calls,
//! and map domain outcomes onto HTTP statuses. The mobile client is the
//! only intended consumer.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
