//! Community post model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use crate::user::UserRole;

/// A post on the community feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommunityPost {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    /// Free-form tags stored as a JSON array.
    pub tags: Option<Json<Vec<String>>>,
    /// Denormalized like count, kept in step with `post_likes` rows.
    pub likes_count: i32,
    /// Denormalized comment count.
    pub comments_count: i32,
    /// Soft-delete flag; unpublished posts are invisible to reads.
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post joined with its author's identity fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: CommunityPost,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub role: UserRole,
}

/// Data required to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub author_id: i64,
    pub content: String,
    pub tags: Option<Vec<String>>,
}

/// Partial update of a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl PostUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.tags.is_none() && self.is_published.is_none()
    }
}

/// Optional filters for the community feed.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author_id: Option<i64>,
    /// Substring match on post content.
    pub search: Option<String>,
}
