//! Course repository implementation.

use sqlx::mysql::MySql;
use sqlx::{MySqlPool, QueryBuilder};

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::types::pagination::{Page, PageRequest};
use campus_entity::course::model::{CourseDetail, CourseFilter, CourseUpdate, NewCourse};
use campus_entity::course::{Course, EnrolledStudent};

/// Base SELECT joining the instructor's display name.
const DETAIL_SELECT: &str = "SELECT c.*, CONCAT(u.first_name, ' ', u.last_name) AS instructor_name \
     FROM courses c LEFT JOIN users u ON c.instructor_id = u.id \
     WHERE c.is_active = 1";

/// Repository for course CRUD, listing, and enrollment operations.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: MySqlPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find an active course by primary key, without the instructor join.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find course by id", e)
            })
    }

    /// Find an active course joined with the instructor name.
    pub async fn find_detail(&self, id: i64) -> AppResult<Option<CourseDetail>> {
        let sql = format!("{DETAIL_SELECT} AND c.id = ?");
        sqlx::query_as::<_, CourseDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find course", e))
    }

    /// Check whether an active course already uses the code.
    pub async fn code_taken(&self, course_code: &str) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM courses WHERE course_code = ? AND is_active = 1 LIMIT 1",
        )
        .bind(course_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check course code", e))?;
        Ok(existing.is_some())
    }

    /// List active courses with optional filters and pagination.
    pub async fn list(
        &self,
        filter: &CourseFilter,
        page: &PageRequest,
    ) -> AppResult<Page<CourseDetail>> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM courses c WHERE c.is_active = 1");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count courses", e)
            })?;

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(DETAIL_SELECT);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY c.created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let courses = query
            .build_query_as::<CourseDetail>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list courses", e))?;

        Ok(Page::new(courses, page.page, page.limit, total as u64))
    }

    /// Create a new course, returning its ID.
    pub async fn create(&self, data: &NewCourse) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO courses (course_code, title, description, credits, category, \
                                  instructor_id, max_students, semester, academic_year, \
                                  start_date, end_date, schedule, location) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.course_code)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.credits)
        .bind(&data.category)
        .bind(data.instructor_id)
        .bind(data.max_students)
        .bind(&data.semester)
        .bind(&data.academic_year)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.schedule)
        .bind(&data.location)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Course code is already taken")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create course", e),
        })?;

        Ok(result.last_insert_id() as i64)
    }

    /// Apply a partial update to an active course.
    pub async fn update(&self, id: i64, data: &CourseUpdate) -> AppResult<()> {
        sqlx::query(
            "UPDATE courses SET title = COALESCE(?, title), \
                                description = COALESCE(?, description), \
                                credits = COALESCE(?, credits), \
                                category = COALESCE(?, category), \
                                instructor_id = COALESCE(?, instructor_id), \
                                max_students = COALESCE(?, max_students), \
                                semester = COALESCE(?, semester), \
                                academic_year = COALESCE(?, academic_year), \
                                start_date = COALESCE(?, start_date), \
                                end_date = COALESCE(?, end_date), \
                                schedule = COALESCE(?, schedule), \
                                location = COALESCE(?, location), \
                                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_active = 1",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.credits)
        .bind(&data.category)
        .bind(data.instructor_id)
        .bind(data.max_students)
        .bind(&data.semester)
        .bind(&data.academic_year)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.schedule)
        .bind(&data.location)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update course", e))?;
        Ok(())
    }

    /// Soft-delete a course. Returns false when no active row matched.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE courses SET is_active = 0, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete course", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether the student already holds an `enrolled` row for the course.
    pub async fn is_enrolled(&self, course_id: i64, student_id: i64) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM course_enrollments \
             WHERE student_id = ? AND course_id = ? AND status = 'enrolled' LIMIT 1",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check enrollment", e))?;
        Ok(existing.is_some())
    }

    /// Enroll a student: insert the enrollment row and bump the seat counter
    /// in one transaction.
    pub async fn enroll(&self, course_id: i64, student_id: i64) -> AppResult<i64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "INSERT INTO course_enrollments (student_id, course_id, status) \
             VALUES (?, ?, 'enrolled')",
        )
        .bind(student_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Student is already enrolled in this course")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create enrollment", e),
        })?;

        sqlx::query(
            "UPDATE courses SET current_students = current_students + 1, \
                                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(course_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update student count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit enrollment", e)
        })?;

        Ok(result.last_insert_id() as i64)
    }

    /// List students currently enrolled in a course.
    pub async fn enrolled_students(&self, course_id: i64) -> AppResult<Vec<EnrolledStudent>> {
        sqlx::query_as::<_, EnrolledStudent>(
            "SELECT u.id, u.first_name, u.last_name, u.email, u.avatar, \
                    ce.enrollment_date, ce.status, ce.grade, ce.final_score \
             FROM course_enrollments ce \
             JOIN users u ON ce.student_id = u.id \
             WHERE ce.course_id = ? AND ce.status = 'enrolled' \
             ORDER BY u.first_name, u.last_name",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list enrolled students", e)
        })
    }
}

/// Append filter conditions to a course query.
fn push_filter<'a>(query: &mut QueryBuilder<'a, MySql>, filter: &'a CourseFilter) {
    if let Some(category) = &filter.category {
        query.push(" AND c.category = ").push_bind(category);
    }
    if let Some(semester) = &filter.semester {
        query.push(" AND c.semester = ").push_bind(semester);
    }
    if let Some(academic_year) = &filter.academic_year {
        query.push(" AND c.academic_year = ").push_bind(academic_year);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query
            .push(" AND (c.title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.description LIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.course_code LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
