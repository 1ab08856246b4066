//! Business logic, one module per domain
//!
//! Services take the pool and the authenticated caller, enforce the
//! ownership and validation rules, and return `ServiceResult`.

pub mod accounts;
pub mod earnings;
pub mod geocode;
pub mod money;
pub mod orders;
pub mod stations;

#[cfg(test)]
pub(crate) mod testing;
