//! Community feed: posts, likes, and comments.

use std::sync::Arc;

use tracing::info;

use campus_core::error::AppError;
use campus_core::types::pagination::{Page, PageRequest};
use campus_database::repositories::community::CommunityRepository;
use campus_entity::community::comment::{CommentDetail, NewComment};
use campus_entity::community::post::{NewPost, PostDetail, PostFilter, PostUpdate};

use crate::context::RequestContext;

/// Handles the community feed.
#[derive(Debug, Clone)]
pub struct CommunityService {
    community: Arc<CommunityRepository>,
}

impl CommunityService {
    /// Creates a new community service.
    pub fn new(community: Arc<CommunityRepository>) -> Self {
        Self { community }
    }

    /// Lists published posts with filters and pagination.
    pub async fn list_posts(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Page<PostDetail>, AppError> {
        self.community.list_posts(filter, page).await
    }

    /// Fetches one published post.
    pub async fn get_post(&self, id: i64) -> Result<PostDetail, AppError> {
        self.community
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post with this ID does not exist"))
    }

    /// Creates a post authored by the caller.
    pub async fn create_post(
        &self,
        ctx: &RequestContext,
        content: String,
        tags: Option<Vec<String>>,
    ) -> Result<PostDetail, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Post content cannot be empty"));
        }

        let id = self
            .community
            .create_post(&NewPost {
                author_id: ctx.user_id,
                content,
                tags,
            })
            .await?;

        info!(post_id = id, author_id = ctx.user_id, "Post created");

        self.get_post(id).await
    }

    /// Applies a partial update and returns the refreshed post.
    pub async fn update_post(&self, id: i64, data: &PostUpdate) -> Result<PostDetail, AppError> {
        self.get_post(id).await?;

        if data.is_empty() {
            return Err(AppError::validation(
                "Please provide at least one valid field",
            ));
        }

        self.community.update_post(id, data).await?;
        self.get_post(id).await
    }

    /// Soft-deletes a post.
    pub async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.community.soft_delete_post(id).await?;
        if !deleted {
            return Err(AppError::not_found("Post with this ID does not exist"));
        }

        info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// Toggles the caller's like on a post. Returns the resulting state.
    pub async fn toggle_like(&self, ctx: &RequestContext, post_id: i64) -> Result<bool, AppError> {
        if !self.community.post_exists(post_id).await? {
            return Err(AppError::not_found("Post with this ID does not exist"));
        }

        self.community.toggle_like(post_id, ctx.user_id).await
    }

    /// Lists a post's comments, oldest first.
    pub async fn comments(&self, post_id: i64) -> Result<Vec<CommentDetail>, AppError> {
        if !self.community.post_exists(post_id).await? {
            return Err(AppError::not_found("Post with this ID does not exist"));
        }

        self.community.comments_for_post(post_id).await
    }

    /// Adds a comment authored by the caller.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        post_id: i64,
        content: String,
        parent_id: Option<i64>,
    ) -> Result<Vec<CommentDetail>, AppError> {
        if !self.community.post_exists(post_id).await? {
            return Err(AppError::not_found("Post with this ID does not exist"));
        }

        if content.trim().is_empty() {
            return Err(AppError::validation("Comment content cannot be empty"));
        }

        self.community
            .add_comment(&NewComment {
                post_id,
                author_id: ctx.user_id,
                content,
                parent_id,
            })
            .await?;

        info!(post_id, author_id = ctx.user_id, "Comment added");

        self.community.comments_for_post(post_id).await
    }
}
