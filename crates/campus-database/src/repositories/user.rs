//! User repository implementation.

use sqlx::mysql::MySql;
use sqlx::{MySqlPool, QueryBuilder};

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::types::pagination::{Page, PageRequest};
use campus_entity::user::model::{NewUser, UserFilter, UserUpdate};
use campus_entity::user::profile::UserProfile;
use campus_entity::user::User;

/// Columns selected for profile queries; the password hash is never read.
const PROFILE_COLUMNS: &str = "u.id, u.username, u.email, u.first_name, u.last_name, u.role, \
     u.phone, u.address, u.date_of_birth, u.gender, u.avatar, u.created_at, \
     sp.student_id, sp.enrollment_date, sp.graduation_date, sp.major, sp.minor, \
     sp.gpa, sp.credits_earned, sp.academic_status, \
     fp.employee_id, fp.department, fp.position, fp.hire_date, fp.office_location, \
     fp.office_hours, fp.specialization";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find an active user by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find an active user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? AND is_active = 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Check whether any account (active or not) holds the email or username.
    pub async fn email_or_username_taken(&self, email: &str, username: &str) -> AppResult<bool> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = ? OR username = ? LIMIT 1")
                .bind(email)
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check user existence", e)
                })?;
        Ok(existing.is_some())
    }

    /// List active users with optional filters and pagination.
    pub async fn list(&self, filter: &UserFilter, page: &PageRequest) -> AppResult<Page<User>> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM users WHERE is_active = 1");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let mut query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT * FROM users WHERE is_active = 1");
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let users = query
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(Page::new(users, page.page, page.limit, total as u64))
    }

    /// Create a new user, returning its ID.
    pub async fn create(&self, data: &NewUser) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, role, \
                                phone, address, date_of_birth, gender) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.role)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(data.date_of_birth)
        .bind(&data.gender)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Email or username is already taken")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })?;

        Ok(result.last_insert_id() as i64)
    }

    /// Apply a partial update to an active user's mutable fields.
    pub async fn update(&self, id: i64, data: &UserUpdate) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET first_name = COALESCE(?, first_name), \
                              last_name = COALESCE(?, last_name), \
                              phone = COALESCE(?, phone), \
                              address = COALESCE(?, address), \
                              date_of_birth = COALESCE(?, date_of_birth), \
                              gender = COALESCE(?, gender), \
                              avatar = COALESCE(?, avatar), \
                              updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_active = 1",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(data.date_of_birth)
        .bind(&data.gender)
        .bind(&data.avatar)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?;
        Ok(())
    }

    /// Update an active user's password hash.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_active = 1",
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;
        Ok(())
    }

    /// Soft-delete a user. Returns false when no active row matched.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_active = 0, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch a user joined with their student/faculty profile rows.
    pub async fn find_profile(&self, id: i64) -> AppResult<Option<UserProfile>> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM users u \
             LEFT JOIN student_profiles sp ON u.id = sp.user_id \
             LEFT JOIN faculty_profiles fp ON u.id = fp.user_id \
             WHERE u.id = ? AND u.is_active = 1"
        );
        sqlx::query_as::<_, UserProfile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch user profile", e)
            })
    }
}

/// Append filter conditions to a user query.
fn push_filter(query: &mut QueryBuilder<'_, MySql>, filter: &UserFilter) {
    if let Some(role) = filter.role {
        query.push(" AND role = ").push_bind(role);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query
            .push(" AND (first_name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR email LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
