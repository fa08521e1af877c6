//! Attendance record model and statistics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::AttendanceStatus;

/// One student's attendance on one class date.
///
/// A (student, course, date) triple is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// The class date the record covers.
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    /// The user who recorded the entry.
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An attendance row joined with student and course identity fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_title: String,
    pub course_code: String,
}

/// Data required to create an attendance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendance {
    pub student_id: i64,
    pub course_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub recorded_by: i64,
}

/// Partial update of an attendance record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

impl AttendanceUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }
}

/// Optional filters for attendance listings.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Optional filters for attendance statistics.
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub course_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Aggregate attendance figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub total_classes: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub excused_count: i64,
    /// Present / total, as a percentage rounded to two decimals.
    /// `None` when there are no records.
    pub attendance_percentage: Option<f64>,
}

impl AttendanceStats {
    /// Build stats from raw counts, computing the percentage.
    pub fn from_counts(total: i64, present: i64, absent: i64, late: i64, excused: i64) -> Self {
        let attendance_percentage = if total > 0 {
            Some((present as f64 / total as f64 * 10000.0).round() / 100.0)
        } else {
            None
        };
        Self {
            total_classes: total,
            present_count: present,
            absent_count: absent,
            late_count: late,
            excused_count: excused,
            attendance_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        let stats = AttendanceStats::from_counts(3, 2, 1, 0, 0);
        assert_eq!(stats.attendance_percentage, Some(66.67));
    }

    #[test]
    fn test_percentage_empty() {
        let stats = AttendanceStats::from_counts(0, 0, 0, 0, 0);
        assert_eq!(stats.attendance_percentage, None);
    }
}
