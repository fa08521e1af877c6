//! Performance records: grade and score views over enrollments.

use std::sync::Arc;

use tracing::info;

use campus_core::error::AppError;
use campus_core::types::pagination::{Page, PageRequest};
use campus_database::repositories::enrollment::EnrollmentRepository;
use campus_entity::course::enrollment::{
    EnrollmentDetail, EnrollmentFilter, EnrollmentUpdate, NewEnrollment, PerformanceStats,
};

/// Handles performance records stored on `course_enrollments`.
#[derive(Debug, Clone)]
pub struct PerformanceService {
    enrollments: Arc<EnrollmentRepository>,
}

impl PerformanceService {
    /// Creates a new performance service.
    pub fn new(enrollments: Arc<EnrollmentRepository>) -> Self {
        Self { enrollments }
    }

    /// Lists records with filters and pagination.
    pub async fn list(
        &self,
        filter: &EnrollmentFilter,
        page: &PageRequest,
    ) -> Result<Page<EnrollmentDetail>, AppError> {
        self.enrollments.list(filter, page).await
    }

    /// Fetches one record.
    pub async fn get(&self, id: i64) -> Result<EnrollmentDetail, AppError> {
        self.enrollments
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Record with this ID does not exist"))
    }

    /// Creates a record; one per student/course pair.
    pub async fn create(&self, data: NewEnrollment) -> Result<EnrollmentDetail, AppError> {
        if self
            .enrollments
            .exists_for(data.student_id, data.course_id)
            .await?
        {
            return Err(AppError::conflict(
                "Performance record for this student and course already exists",
            ));
        }

        let id = self.enrollments.create(&data).await?;

        info!(
            record_id = id,
            student_id = data.student_id,
            course_id = data.course_id,
            "Performance record created"
        );

        self.get(id).await
    }

    /// Updates status, grade, or score, returning the refreshed row.
    pub async fn update(
        &self,
        id: i64,
        data: &EnrollmentUpdate,
    ) -> Result<EnrollmentDetail, AppError> {
        if !self.enrollments.exists(id).await? {
            return Err(AppError::not_found("Record with this ID does not exist"));
        }

        if data.is_empty() {
            return Err(AppError::validation(
                "Please provide at least one valid field",
            ));
        }

        self.enrollments.update(id, data).await?;
        self.get(id).await
    }

    /// Deletes a record.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.enrollments.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Record with this ID does not exist"));
        }

        info!(record_id = id, "Performance record deleted");
        Ok(())
    }

    /// Aggregate score figures for one student.
    pub async fn student_stats(&self, student_id: i64) -> Result<PerformanceStats, AppError> {
        let (total, completed, average, highest, lowest) =
            self.enrollments.student_aggregates(student_id).await?;
        Ok(PerformanceStats {
            total_courses: total,
            completed_courses: completed,
            average_score: average,
            highest_score: highest,
            lowest_score: lowest,
        })
    }
}
