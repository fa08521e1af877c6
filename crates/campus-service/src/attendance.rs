//! Attendance recording and statistics.

use std::sync::Arc;

use tracing::info;

use campus_core::error::AppError;
use campus_core::types::pagination::{Page, PageRequest};
use campus_database::repositories::attendance::AttendanceRepository;
use campus_entity::attendance::model::{
    AttendanceDetail, AttendanceFilter, AttendanceStats, AttendanceUpdate, NewAttendance,
    StatsFilter,
};

/// Handles attendance records and their aggregate views.
#[derive(Debug, Clone)]
pub struct AttendanceService {
    attendance: Arc<AttendanceRepository>,
}

impl AttendanceService {
    /// Creates a new attendance service.
    pub fn new(attendance: Arc<AttendanceRepository>) -> Self {
        Self { attendance }
    }

    /// Lists records with filters and pagination.
    pub async fn list(
        &self,
        filter: &AttendanceFilter,
        page: &PageRequest,
    ) -> Result<Page<AttendanceDetail>, AppError> {
        self.attendance.list(filter, page).await
    }

    /// Fetches one record.
    pub async fn get(&self, id: i64) -> Result<AttendanceDetail, AppError> {
        self.attendance
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Record with this ID does not exist"))
    }

    /// Creates a record; one per student/course/date.
    pub async fn create(&self, data: NewAttendance) -> Result<AttendanceDetail, AppError> {
        if self
            .attendance
            .exists_for(data.student_id, data.course_id, data.date)
            .await?
        {
            return Err(AppError::conflict(
                "Attendance record for this student, course, and date already exists",
            ));
        }

        let id = self.attendance.create(&data).await?;

        info!(
            record_id = id,
            student_id = data.student_id,
            course_id = data.course_id,
            "Attendance recorded"
        );

        self.get(id).await
    }

    /// Updates status and notes, returning the refreshed row.
    pub async fn update(&self, id: i64, data: &AttendanceUpdate) -> Result<AttendanceDetail, AppError> {
        if !self.attendance.exists(id).await? {
            return Err(AppError::not_found("Record with this ID does not exist"));
        }

        if data.is_empty() {
            return Err(AppError::validation(
                "Please provide at least one valid field",
            ));
        }

        self.attendance.update(id, data).await?;
        self.get(id).await
    }

    /// Deletes a record.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.attendance.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Record with this ID does not exist"));
        }

        info!(record_id = id, "Attendance record deleted");
        Ok(())
    }

    /// Aggregate attendance for one student.
    pub async fn student_stats(
        &self,
        student_id: i64,
        filter: &StatsFilter,
    ) -> Result<AttendanceStats, AppError> {
        let (total, present, absent, late, excused) =
            self.attendance.student_counts(student_id, filter).await?;
        Ok(AttendanceStats::from_counts(
            total, present, absent, late, excused,
        ))
    }

    /// Aggregate attendance for one course.
    pub async fn course_stats(
        &self,
        course_id: i64,
        filter: &StatsFilter,
    ) -> Result<AttendanceStats, AppError> {
        let (total, present, absent, late, excused) =
            self.attendance.course_counts(course_id, filter).await?;
        Ok(AttendanceStats::from_counts(
            total, present, absent, late, excused,
        ))
    }
}
