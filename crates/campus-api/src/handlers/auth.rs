//! Auth handlers — register, login, verify, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use campus_auth::Registration;
use campus_core::error::AppError;
use campus_core::types::response::Envelope;

use crate::dto::request::{LoginRequest, RegisterRequest, validated};
use crate::dto::response::{AuthResponse, VerifyResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<AuthResponse>>), AppError> {
    let req = validated(req)?;
    let role = req.parsed_role()?;

    let outcome = state
        .auth_service
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "Registration successful",
            AuthResponse {
                user: outcome.user,
                token: outcome.issued.token,
                expires_at: outcome.issued.expires_at,
            },
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope<AuthResponse>>, AppError> {
    let req = validated(req)?;

    let outcome = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(Envelope::ok(
        "Login successful",
        AuthResponse {
            user: outcome.user,
            token: outcome.issued.token,
            expires_at: outcome.issued.expires_at,
        },
    )))
}

/// GET /api/auth/verify
pub async fn verify(auth: AuthUser) -> Result<Json<Envelope<VerifyResponse>>, AppError> {
    Ok(Json(Envelope::ok(
        "Token verified",
        VerifyResponse {
            user: auth.user,
            token: auth.token,
        },
    )))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is an acknowledgment and the client drops
/// the token.
pub async fn logout() -> Json<Envelope<serde_json::Value>> {
    Json(Envelope::ok_empty("Logout successful"))
}
