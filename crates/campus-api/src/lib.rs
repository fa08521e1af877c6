//! # campus-api
//!
//! HTTP layer for Campus Connect: the Axum router, request handlers, DTOs,
//! and the bearer-token extractor. `AppError` maps itself to HTTP responses
//! in the uniform envelope (see `campus-core`).

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
