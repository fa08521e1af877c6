//! # campus-service
//!
//! Business services for Campus Connect. Each service owns the rules of one
//! resource: required-field and cross-row validation, duplicate and
//! capacity checks, and orchestration of repository calls. Handlers in
//! `campus-api` stay thin and delegate here.

pub mod attendance;
pub mod community;
pub mod context;
pub mod course;
pub mod event;
pub mod performance;
pub mod user;

pub use context::RequestContext;
