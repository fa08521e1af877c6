//! # campus-core
//!
//! Core crate for Campus Connect. Contains configuration schemas, the
//! uniform response envelope, pagination types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Campus Connect
//! crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
