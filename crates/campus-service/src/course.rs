//! Course management and enrollment operations.

use std::sync::Arc;

use tracing::info;

use campus_core::error::AppError;
use campus_core::types::pagination::{Page, PageRequest};
use campus_database::repositories::course::CourseRepository;
use campus_entity::course::model::{CourseDetail, CourseFilter, CourseUpdate, NewCourse};
use campus_entity::course::EnrolledStudent;

/// Handles the course catalog and the enrollment flow.
#[derive(Debug, Clone)]
pub struct CourseService {
    courses: Arc<CourseRepository>,
}

impl CourseService {
    /// Creates a new course service.
    pub fn new(courses: Arc<CourseRepository>) -> Self {
        Self { courses }
    }

    /// Lists active courses with filters and pagination.
    pub async fn list(
        &self,
        filter: &CourseFilter,
        page: &PageRequest,
    ) -> Result<Page<CourseDetail>, AppError> {
        self.courses.list(filter, page).await
    }

    /// Fetches one active course with the instructor name.
    pub async fn get(&self, id: i64) -> Result<CourseDetail, AppError> {
        self.courses
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course with this ID does not exist"))
    }

    /// Creates a course, enforcing code uniqueness.
    pub async fn create(&self, data: NewCourse) -> Result<CourseDetail, AppError> {
        if self.courses.code_taken(&data.course_code).await? {
            return Err(AppError::conflict("Course code is already taken"));
        }

        let id = self.courses.create(&data).await?;

        info!(course_id = id, code = %data.course_code, "Course created");

        self.get(id).await
    }

    /// Applies a partial update and returns the refreshed row.
    pub async fn update(&self, id: i64, data: &CourseUpdate) -> Result<CourseDetail, AppError> {
        self.get(id).await?;

        if data.is_empty() {
            return Err(AppError::validation(
                "Please provide at least one valid field",
            ));
        }

        self.courses.update(id, data).await?;
        self.get(id).await
    }

    /// Soft-deletes a course.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.courses.soft_delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Course with this ID does not exist"));
        }

        info!(course_id = id, "Course deleted");
        Ok(())
    }

    /// Enrolls a student into a course.
    ///
    /// Order of checks follows the API contract: unknown course is 404,
    /// a full course is 400, an existing enrollment is 409. The insert and
    /// the seat-counter bump then run in one transaction.
    pub async fn enroll(&self, course_id: i64, student_id: i64) -> Result<(), AppError> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course with this ID does not exist"))?;

        if course.is_full() {
            return Err(AppError::validation(
                "This course has reached maximum capacity",
            ));
        }

        if self.courses.is_enrolled(course_id, student_id).await? {
            return Err(AppError::conflict(
                "Student is already enrolled in this course",
            ));
        }

        self.courses.enroll(course_id, student_id).await?;

        info!(course_id, student_id, "Student enrolled");
        Ok(())
    }

    /// Lists the students currently enrolled in a course.
    pub async fn students(&self, course_id: i64) -> Result<Vec<EnrolledStudent>, AppError> {
        self.get(course_id).await?;
        self.courses.enrolled_students(course_id).await
    }
}
