//! Enrollment (performance record) repository implementation.

use sqlx::mysql::MySql;
use sqlx::{MySqlPool, QueryBuilder};

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::types::pagination::{Page, PageRequest};
use campus_entity::course::enrollment::{
    EnrollmentDetail, EnrollmentFilter, EnrollmentUpdate, NewEnrollment,
};

/// Base SELECT joining student and course identity fields.
const DETAIL_SELECT: &str =
    "SELECT ce.*, u.first_name, u.last_name, u.email, c.title AS course_title, c.course_code \
     FROM course_enrollments ce \
     JOIN users u ON ce.student_id = u.id \
     JOIN courses c ON ce.course_id = c.id \
     WHERE 1=1";

/// Raw aggregates: scored enrollments, completed, avg, max, min.
pub type ScoreAggregates = (i64, i64, Option<f64>, Option<f64>, Option<f64>);

/// Repository for performance views over `course_enrollments`.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: MySqlPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find an enrollment joined with student and course fields.
    pub async fn find_detail(&self, id: i64) -> AppResult<Option<EnrollmentDetail>> {
        let sql = format!("{DETAIL_SELECT} AND ce.id = ?");
        sqlx::query_as::<_, EnrollmentDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find performance record", e)
            })
    }

    /// Check whether the enrollment exists by primary key.
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM course_enrollments WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to check performance record",
                        e,
                    )
                })?;
        Ok(existing.is_some())
    }

    /// Check whether any enrollment links the student and course.
    pub async fn exists_for(&self, student_id: i64, course_id: i64) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM course_enrollments WHERE student_id = ? AND course_id = ? LIMIT 1",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check performance record", e)
        })?;
        Ok(existing.is_some())
    }

    /// List enrollments with optional filters and pagination.
    pub async fn list(
        &self,
        filter: &EnrollmentFilter,
        page: &PageRequest,
    ) -> AppResult<Page<EnrollmentDetail>> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM course_enrollments ce WHERE 1=1");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count performance records", e)
            })?;

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(DETAIL_SELECT);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY ce.updated_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let records = query
            .build_query_as::<EnrollmentDetail>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list performance records", e)
            })?;

        Ok(Page::new(records, page.page, page.limit, total as u64))
    }

    /// Create a performance record directly, returning its ID.
    pub async fn create(&self, data: &NewEnrollment) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO course_enrollments (student_id, course_id, status, grade, final_score) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(data.student_id)
        .bind(data.course_id)
        .bind(data.status)
        .bind(&data.grade)
        .bind(data.final_score)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::conflict(
                "Performance record for this student and course already exists",
            ),
            _ => {
                AppError::with_source(ErrorKind::Database, "Failed to create performance record", e)
            }
        })?;

        Ok(result.last_insert_id() as i64)
    }

    /// Apply a partial update to status, grade, or score.
    pub async fn update(&self, id: i64, data: &EnrollmentUpdate) -> AppResult<()> {
        sqlx::query(
            "UPDATE course_enrollments SET status = COALESCE(?, status), \
                                           grade = COALESCE(?, grade), \
                                           final_score = COALESCE(?, final_score), \
                                           updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(data.status)
        .bind(&data.grade)
        .bind(data.final_score)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update performance record", e)
        })?;
        Ok(())
    }

    /// Hard-delete an enrollment. Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM course_enrollments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete performance record", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregate score figures over a student's scored enrollments.
    pub async fn student_aggregates(&self, student_id: i64) -> AppResult<ScoreAggregates> {
        sqlx::query_as::<_, ScoreAggregates>(
            "SELECT COUNT(*), \
                    COALESCE(CAST(SUM(status = 'completed') AS SIGNED), 0), \
                    AVG(final_score), MAX(final_score), MIN(final_score) \
             FROM course_enrollments \
             WHERE student_id = ? AND final_score IS NOT NULL",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute performance stats", e)
        })
    }
}

/// Append filter conditions to an enrollment query.
fn push_filter(query: &mut QueryBuilder<'_, MySql>, filter: &EnrollmentFilter) {
    if let Some(student_id) = filter.student_id {
        query.push(" AND ce.student_id = ").push_bind(student_id);
    }
    if let Some(course_id) = filter.course_id {
        query.push(" AND ce.course_id = ").push_bind(course_id);
    }
    if let Some(status) = filter.status {
        query.push(" AND ce.status = ").push_bind(status);
    }
}
