//! HTTP handlers, one module per resource.

pub mod catalog;
pub mod clients;
pub mod inventory;
pub mod jobs;
pub mod racquets;
