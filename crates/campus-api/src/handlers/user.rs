//! User handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;
use campus_core::types::pagination::Page;
use campus_core::types::response::Envelope;
use campus_entity::user::profile::UserProfile;
use campus_entity::user::User;
use campus_service::user::CreateUser;

use crate::dto::request::{
    ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserListQuery, validated,
};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Envelope<Page<User>>>, AppError> {
    let filter = query.into_filter()?;
    let page = page.into_page_request();

    let users = state.user_service.list(&filter, &page).await?;

    Ok(Json(Envelope::ok("Users retrieved successfully", users)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<User>>, AppError> {
    let user = state.user_service.get(id).await?;

    Ok(Json(Envelope::ok("User retrieved successfully", user)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<Envelope<User>>, AppError> {
    let req = validated(req)?;
    let role = req.parsed_role()?;

    let user = state
        .user_service
        .create(CreateUser {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role,
            phone: req.phone,
            address: req.address,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
        })
        .await?;

    Ok(Json(Envelope::ok("User created successfully", user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<Envelope<User>>, AppError> {
    let user = state.user_service.update(id, &req.into()).await?;

    Ok(Json(Envelope::ok("User updated successfully", user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.user_service.delete(id).await?;

    Ok(Json(Envelope::ok_empty("User deleted successfully")))
}

/// GET /api/users/{id}/profile
pub async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<UserProfile>>, AppError> {
    let profile = state.user_service.profile(id).await?;

    Ok(Json(Envelope::ok(
        "User profile retrieved successfully",
        profile,
    )))
}

/// PUT /api/users/{id}/password
pub async fn change_password(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    let req = validated(req)?;

    state
        .user_service
        .change_password(id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(Envelope::ok_empty("Password updated successfully")))
}
