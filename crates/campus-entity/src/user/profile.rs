//! Extended user profile joined with role-specific profile tables.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// A user row left-joined with the student and faculty profile tables.
///
/// Profile columns are `None` when the user has no row in the
/// corresponding table, so a student carries `None` in every faculty
/// field and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,

    // student_profiles
    pub student_id: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub graduation_date: Option<NaiveDate>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub gpa: Option<f64>,
    pub credits_earned: Option<i32>,
    pub academic_status: Option<String>,

    // faculty_profiles
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub office_location: Option<String>,
    pub office_hours: Option<String>,
    pub specialization: Option<String>,
}
