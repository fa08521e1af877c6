//! Request handlers, one module per resource.

pub mod attendance;
pub mod auth;
pub mod community;
pub mod course;
pub mod event;
pub mod health;
pub mod performance;
pub mod user;

use campus_core::error::AppError;

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::not_found("Resource not found")
}

/// Fallback for known routes hit with an unsupported verb.
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed("HTTP method not supported")
}
