//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_entity::user::User;

/// Login and registration response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user (password hash never serialized).
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Token verification response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// The account the token names.
    pub user: User,
    /// The verified token, echoed back.
    pub token: String,
}

/// Like toggle response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    /// Whether the post is liked after the toggle.
    pub liked: bool,
}

/// Health check response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
