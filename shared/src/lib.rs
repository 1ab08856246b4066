//! Shared types for the RefuelNow marketplace
//!
//! Types used by the server and by any Rust client of its API:
//! error codes, error/response envelopes, domain models and small
//! utilities (IDs, timestamps).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
