//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and loads the account it names.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use campus_core::error::AppError;
use campus_entity::user::User;
use campus_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user available in handlers.
///
/// Holds the loaded user row and the raw bearer token. The database lookup
/// means a token for a deleted or deactivated account is rejected even if
/// its signature is still valid.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated account.
    pub user: User,
    /// The raw bearer token the caller presented.
    pub token: String,
}

impl AuthUser {
    /// Builds the per-request caller context.
    pub fn context(&self) -> RequestContext {
        RequestContext::from_user(&self.user)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Authorization header is required"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let user = state.auth_service.authenticate(token).await?;

        Ok(AuthUser {
            user,
            token: token.to_string(),
        })
    }
}
