//! Course enrollment rows, which double as performance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Actively enrolled.
    Enrolled,
    /// Finished the course.
    Completed,
    /// Dropped before completion.
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = campus_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enrolled" => Ok(Self::Enrolled),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            _ => Err(campus_core::AppError::validation(format!(
                "Invalid enrollment status: '{s}'. Expected one of: enrolled, completed, dropped"
            ))),
        }
    }
}

/// A student's enrollment in a course, carrying grade and score once set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    /// Letter grade, e.g. `A-`.
    pub grade: Option<String>,
    /// Final numeric score (0-100).
    pub final_score: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

/// An enrollment row joined with student and course identity fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_title: String,
    pub course_code: String,
}

/// One enrolled student as seen from the course roster.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrolledStudent {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub grade: Option<String>,
    pub final_score: Option<f64>,
}

/// Data for creating a performance record directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub status: EnrollmentStatus,
    pub grade: Option<String>,
    pub final_score: Option<f64>,
}

/// Partial update of an enrollment's performance fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentUpdate {
    pub status: Option<EnrollmentStatus>,
    pub grade: Option<String>,
    pub final_score: Option<f64>,
}

impl EnrollmentUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.grade.is_none() && self.final_score.is_none()
    }
}

/// Optional filters for performance listings.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<EnrollmentStatus>,
}

/// Aggregate performance figures for one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Enrollments with a recorded final score.
    pub total_courses: i64,
    /// Of those, how many are completed.
    pub completed_courses: i64,
    pub average_score: Option<f64>,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
}
