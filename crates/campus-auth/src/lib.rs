//! # campus-auth
//!
//! Authentication for Campus Connect: JWT bearer tokens (HS256), Argon2id
//! password hashing with a configurable policy, and the service driving
//! login, registration, and token verification.

pub mod jwt;
pub mod password;
pub mod service;

pub use service::{AuthOutcome, AuthService, Registration};
