//! Health check handler.

use axum::Json;

use campus_core::types::response::Envelope;

use crate::dto::response::HealthResponse;

/// GET /api/health
pub async fn health_check() -> Json<Envelope<HealthResponse>> {
    Json(Envelope::ok(
        "API is running",
        HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    ))
}
