//! # campus-entity
//!
//! Domain models for Campus Connect: users and their profiles, courses and
//! enrollments, attendance records, community posts, and events. All models
//! are `serde`-serializable and decodable from MySQL rows via
//! `sqlx::FromRow`.

pub mod attendance;
pub mod community;
pub mod course;
pub mod event;
pub mod user;
