//! Attendance repository implementation.

use chrono::NaiveDate;
use sqlx::mysql::MySql;
use sqlx::{MySqlPool, QueryBuilder};

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::types::pagination::{Page, PageRequest};
use campus_entity::attendance::model::{
    AttendanceDetail, AttendanceFilter, AttendanceUpdate, NewAttendance, StatsFilter,
};

/// Base SELECT joining student and course identity fields.
const DETAIL_SELECT: &str =
    "SELECT ar.*, u.first_name, u.last_name, u.email, c.title AS course_title, c.course_code \
     FROM attendance_records ar \
     JOIN users u ON ar.student_id = u.id \
     JOIN courses c ON ar.course_id = c.id \
     WHERE 1=1";

/// Raw aggregate counts: total, present, absent, late, excused.
pub type StatusCounts = (i64, i64, i64, i64, i64);

/// Repository for attendance record CRUD and statistics.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: MySqlPool,
}

impl AttendanceRepository {
    /// Create a new attendance repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find a record joined with student and course fields.
    pub async fn find_detail(&self, id: i64) -> AppResult<Option<AttendanceDetail>> {
        let sql = format!("{DETAIL_SELECT} AND ar.id = ?");
        sqlx::query_as::<_, AttendanceDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find attendance record", e)
            })
    }

    /// Check whether the record exists by primary key.
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM attendance_records WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to check attendance record",
                        e,
                    )
                })?;
        Ok(existing.is_some())
    }

    /// Check whether a record already covers the student/course/date triple.
    pub async fn exists_for(
        &self,
        student_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM attendance_records \
             WHERE student_id = ? AND course_id = ? AND date = ? LIMIT 1",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check attendance record", e)
        })?;
        Ok(existing.is_some())
    }

    /// List records with optional filters and pagination.
    pub async fn list(
        &self,
        filter: &AttendanceFilter,
        page: &PageRequest,
    ) -> AppResult<Page<AttendanceDetail>> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM attendance_records ar WHERE 1=1");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count attendance records", e)
            })?;

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(DETAIL_SELECT);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY ar.date DESC, ar.created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let records = query
            .build_query_as::<AttendanceDetail>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list attendance records", e)
            })?;

        Ok(Page::new(records, page.page, page.limit, total as u64))
    }

    /// Create a new record, returning its ID.
    pub async fn create(&self, data: &NewAttendance) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO attendance_records (student_id, course_id, date, status, notes, recorded_by) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(data.student_id)
        .bind(data.course_id)
        .bind(data.date)
        .bind(data.status)
        .bind(&data.notes)
        .bind(data.recorded_by)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::conflict(
                "Attendance record for this student, course, and date already exists",
            ),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create attendance record", e),
        })?;

        Ok(result.last_insert_id() as i64)
    }

    /// Apply a partial update to a record's status and notes.
    pub async fn update(&self, id: i64, data: &AttendanceUpdate) -> AppResult<()> {
        sqlx::query(
            "UPDATE attendance_records SET status = COALESCE(?, status), \
                                           notes = COALESCE(?, notes), \
                                           updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(data.status)
        .bind(&data.notes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update attendance record", e)
        })?;
        Ok(())
    }

    /// Hard-delete a record. Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete attendance record", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregate status counts for one student.
    pub async fn student_counts(
        &self,
        student_id: i64,
        filter: &StatsFilter,
    ) -> AppResult<StatusCounts> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT COUNT(*), \
                    COALESCE(CAST(SUM(status = 'present') AS SIGNED), 0), \
                    COALESCE(CAST(SUM(status = 'absent') AS SIGNED), 0), \
                    COALESCE(CAST(SUM(status = 'late') AS SIGNED), 0), \
                    COALESCE(CAST(SUM(status = 'excused') AS SIGNED), 0) \
             FROM attendance_records WHERE student_id = ",
        );
        query.push_bind(student_id);
        push_stats_filter(&mut query, filter);

        query
            .build_query_as::<StatusCounts>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to compute student stats", e)
            })
    }

    /// Aggregate status counts for one course.
    pub async fn course_counts(
        &self,
        course_id: i64,
        filter: &StatsFilter,
    ) -> AppResult<StatusCounts> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT COUNT(*), \
                    COALESCE(CAST(SUM(status = 'present') AS SIGNED), 0), \
                    COALESCE(CAST(SUM(status = 'absent') AS SIGNED), 0), \
                    COALESCE(CAST(SUM(status = 'late') AS SIGNED), 0), \
                    COALESCE(CAST(SUM(status = 'excused') AS SIGNED), 0) \
             FROM attendance_records WHERE course_id = ",
        );
        query.push_bind(course_id);
        push_stats_filter(&mut query, filter);

        query
            .build_query_as::<StatusCounts>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to compute course stats", e)
            })
    }
}

/// Append filter conditions to an attendance list query.
fn push_filter(query: &mut QueryBuilder<'_, MySql>, filter: &AttendanceFilter) {
    if let Some(student_id) = filter.student_id {
        query.push(" AND ar.student_id = ").push_bind(student_id);
    }
    if let Some(course_id) = filter.course_id {
        query.push(" AND ar.course_id = ").push_bind(course_id);
    }
    if let Some(status) = filter.status {
        query.push(" AND ar.status = ").push_bind(status);
    }
    if let Some(date) = filter.date {
        query.push(" AND ar.date = ").push_bind(date);
    }
    if let Some(date_from) = filter.date_from {
        query.push(" AND ar.date >= ").push_bind(date_from);
    }
    if let Some(date_to) = filter.date_to {
        query.push(" AND ar.date <= ").push_bind(date_to);
    }
}

/// Append filter conditions to a statistics query.
fn push_stats_filter(query: &mut QueryBuilder<'_, MySql>, filter: &StatsFilter) {
    if let Some(course_id) = filter.course_id {
        query.push(" AND course_id = ").push_bind(course_id);
    }
    if let Some(date) = filter.date {
        query.push(" AND date = ").push_bind(date);
    }
    if let Some(date_from) = filter.date_from {
        query.push(" AND date >= ").push_bind(date_from);
    }
    if let Some(date_to) = filter.date_to {
        query.push(" AND date <= ").push_bind(date_to);
    }
}
