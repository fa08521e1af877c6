//! Community handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;
use campus_core::types::pagination::Page;
use campus_core::types::response::Envelope;
use campus_entity::community::comment::CommentDetail;
use campus_entity::community::post::{PostDetail, PostFilter, PostUpdate};

use crate::dto::request::{
    CreateCommentRequest, CreatePostRequest, PostListQuery, UpdatePostRequest, validated,
};
use crate::dto::response::LikeResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/community/posts
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Envelope<Page<PostDetail>>>, AppError> {
    let filter = PostFilter {
        author_id: query.author_id,
        search: query.search,
    };

    let posts = state
        .community_service
        .list_posts(&filter, &page.into_page_request())
        .await?;

    Ok(Json(Envelope::ok(
        "Community posts retrieved successfully",
        posts,
    )))
}

/// GET /api/community/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<PostDetail>>, AppError> {
    let post = state.community_service.get_post(id).await?;

    Ok(Json(Envelope::ok("Post retrieved successfully", post)))
}

/// POST /api/community/posts
///
/// The authenticated caller is the author.
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<Envelope<PostDetail>>, AppError> {
    let req = validated(req)?;

    let post = state
        .community_service
        .create_post(&auth.context(), req.content, req.tags)
        .await?;

    Ok(Json(Envelope::ok("Post created successfully", post)))
}

/// PUT /api/community/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Envelope<PostDetail>>, AppError> {
    let update = PostUpdate {
        content: req.content,
        tags: req.tags,
        is_published: req.is_published,
    };

    let post = state.community_service.update_post(id, &update).await?;

    Ok(Json(Envelope::ok("Post updated successfully", post)))
}

/// DELETE /api/community/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.community_service.delete_post(id).await?;

    Ok(Json(Envelope::ok_empty("Post deleted successfully")))
}

/// POST /api/community/posts/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<LikeResponse>>, AppError> {
    let liked = state
        .community_service
        .toggle_like(&auth.context(), id)
        .await?;

    let message = if liked {
        "Post liked successfully"
    } else {
        "Post unliked successfully"
    };

    Ok(Json(Envelope::ok(message, LikeResponse { liked })))
}

/// GET /api/community/posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Vec<CommentDetail>>>, AppError> {
    let comments = state.community_service.comments(id).await?;

    Ok(Json(Envelope::ok(
        "Comments retrieved successfully",
        comments,
    )))
}

/// POST /api/community/posts/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<Envelope<Vec<CommentDetail>>>, AppError> {
    let req = validated(req)?;

    let comments = state
        .community_service
        .add_comment(&auth.context(), id, req.content, req.parent_id)
        .await?;

    Ok(Json(Envelope::ok("Comment added successfully", comments)))
}
