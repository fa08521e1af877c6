//! Community repository: posts, likes, and comments.

use sqlx::mysql::MySql;
use sqlx::types::Json;
use sqlx::{MySqlPool, QueryBuilder};

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::types::pagination::{Page, PageRequest};
use campus_entity::community::comment::{CommentDetail, NewComment};
use campus_entity::community::post::{NewPost, PostDetail, PostFilter, PostUpdate};

/// Base SELECT joining the author's identity fields.
const DETAIL_SELECT: &str =
    "SELECT cp.*, u.first_name, u.last_name, u.avatar, u.role \
     FROM community_posts cp \
     JOIN users u ON cp.author_id = u.id \
     WHERE cp.is_published = 1";

/// Repository for the community feed.
#[derive(Debug, Clone)]
pub struct CommunityRepository {
    pool: MySqlPool,
}

impl CommunityRepository {
    /// Create a new community repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find a published post joined with author fields.
    pub async fn find_post(&self, id: i64) -> AppResult<Option<PostDetail>> {
        let sql = format!("{DETAIL_SELECT} AND cp.id = ?");
        sqlx::query_as::<_, PostDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// Check whether a published post exists by primary key.
    pub async fn post_exists(&self, id: i64) -> AppResult<bool> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM community_posts WHERE id = ? AND is_published = 1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check post", e)
                })?;
        Ok(existing.is_some())
    }

    /// List published posts, newest first, with optional filters.
    pub async fn list_posts(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> AppResult<Page<PostDetail>> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM community_posts cp WHERE cp.is_published = 1");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(DETAIL_SELECT);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY cp.created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let posts = query
            .build_query_as::<PostDetail>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(Page::new(posts, page.page, page.limit, total as u64))
    }

    /// Create a post, returning its ID.
    pub async fn create_post(&self, data: &NewPost) -> AppResult<i64> {
        let tags = data.tags.clone().map(Json);
        let result =
            sqlx::query("INSERT INTO community_posts (author_id, content, tags) VALUES (?, ?, ?)")
                .bind(data.author_id)
                .bind(&data.content)
                .bind(tags)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to create post", e)
                })?;

        Ok(result.last_insert_id() as i64)
    }

    /// Apply a partial update to a post.
    pub async fn update_post(&self, id: i64, data: &PostUpdate) -> AppResult<()> {
        let tags = data.tags.clone().map(Json);
        sqlx::query(
            "UPDATE community_posts SET content = COALESCE(?, content), \
                                        tags = COALESCE(?, tags), \
                                        is_published = COALESCE(?, is_published), \
                                        updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&data.content)
        .bind(tags)
        .bind(data.is_published)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update post", e))?;
        Ok(())
    }

    /// Soft-delete a post. Returns false when no published row matched.
    pub async fn soft_delete_post(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE community_posts SET is_published = 0, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_published = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Toggle a user's like on a post.
    ///
    /// Inserts or removes the `post_likes` row and adjusts `likes_count` in
    /// the same transaction, so the counter cannot drift from the rows.
    /// Returns true when the post ends up liked.
    pub async fn toggle_like(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM post_likes WHERE post_id = ? AND user_id = ?")
                .bind(post_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check like", e)
                })?;

        let liked = if existing.is_some() {
            sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
                .bind(post_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove like", e)
                })?;

            sqlx::query("UPDATE community_posts SET likes_count = likes_count - 1 WHERE id = ?")
                .bind(post_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update like count", e)
                })?;
            false
        } else {
            sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES (?, ?)")
                .bind(post_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to insert like", e)
                })?;

            sqlx::query("UPDATE community_posts SET likes_count = likes_count + 1 WHERE id = ?")
                .bind(post_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update like count", e)
                })?;
            true
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit like toggle", e)
        })?;

        Ok(liked)
    }

    /// List a post's comments joined with author fields, oldest first.
    pub async fn comments_for_post(&self, post_id: i64) -> AppResult<Vec<CommentDetail>> {
        sqlx::query_as::<_, CommentDetail>(
            "SELECT pc.*, u.first_name, u.last_name, u.avatar \
             FROM post_comments pc \
             JOIN users u ON pc.author_id = u.id \
             WHERE pc.post_id = ? \
             ORDER BY pc.created_at ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Add a comment and bump the post's comment count in one transaction.
    pub async fn add_comment(&self, data: &NewComment) -> AppResult<i64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "INSERT INTO post_comments (post_id, author_id, content, parent_id) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(data.post_id)
        .bind(data.author_id)
        .bind(&data.content)
        .bind(data.parent_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert comment", e))?;

        sqlx::query("UPDATE community_posts SET comments_count = comments_count + 1 WHERE id = ?")
            .bind(data.post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update comment count", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit comment", e)
        })?;

        Ok(result.last_insert_id() as i64)
    }
}

/// Append filter conditions to a post query.
fn push_filter(query: &mut QueryBuilder<'_, MySql>, filter: &PostFilter) {
    if let Some(author_id) = filter.author_id {
        query.push(" AND cp.author_id = ").push_bind(author_id);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query.push(" AND cp.content LIKE ").push_bind(pattern);
    }
}
