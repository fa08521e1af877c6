//! Course catalog model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course offering in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: i64,
    /// Unique course code, e.g. `CS101`.
    pub course_code: String,
    /// Course title.
    pub title: String,
    /// Long description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: i32,
    /// Subject category.
    pub category: String,
    /// The instructing faculty member.
    pub instructor_id: i64,
    /// Seat capacity.
    pub max_students: i32,
    /// Currently enrolled count, maintained by the enroll flow.
    pub current_students: i32,
    /// Semester label, e.g. `Fall`.
    pub semester: String,
    /// Academic year label, e.g. `2025-2026`.
    pub academic_year: String,
    /// First day of classes.
    pub start_date: NaiveDate,
    /// Last day of classes.
    pub end_date: NaiveDate,
    /// Meeting schedule, free-form.
    pub schedule: String,
    /// Room or building.
    pub location: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Whether the course has reached seat capacity.
    pub fn is_full(&self) -> bool {
        self.current_students >= self.max_students
    }
}

/// A course row joined with the instructor's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub course: Course,
    /// Instructor full name, `None` if the instructor row is missing.
    pub instructor_name: Option<String>,
}

/// Data required to create a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub course_code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub category: String,
    pub instructor_id: i64,
    pub max_students: i32,
    pub semester: String,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub schedule: String,
    pub location: Option<String>,
}

/// Partial update of a course's mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub category: Option<String>,
    pub instructor_id: Option<i64>,
    pub max_students: Option<i32>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub schedule: Option<String>,
    pub location: Option<String>,
}

impl CourseUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.credits.is_none()
            && self.category.is_none()
            && self.instructor_id.is_none()
            && self.max_students.is_none()
            && self.semester.is_none()
            && self.academic_year.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.schedule.is_none()
            && self.location.is_none()
    }
}

/// Optional filters for course listings.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    /// Substring match on title, description, or course code.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn course(current: i32, max: i32) -> Course {
        Course {
            id: 1,
            course_code: "CS101".into(),
            title: "Intro to Computer Science".into(),
            description: None,
            credits: 3,
            category: "Computer Science".into(),
            instructor_id: 2,
            max_students: max,
            current_students: current,
            semester: "Fall".into(),
            academic_year: "2025-2026".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
            schedule: "MWF 10:00-11:00".into(),
            location: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_is_full() {
        assert!(!course(29, 30).is_full());
        assert!(course(30, 30).is_full());
        assert!(course(31, 30).is_full());
    }
}
