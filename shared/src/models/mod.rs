//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are snowflake `i64`, all timestamps Unix milliseconds.
//! JSON field names are camelCase to match the web frontend.

pub mod earnings;
pub mod order;
pub mod station;
pub mod user;

// Re-exports
pub use earnings::*;
pub use order::*;
pub use station::*;
pub use user::*;
