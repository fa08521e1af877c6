//! Request DTOs with validation.
//!
//! Enum-valued fields arrive as strings and are parsed with `FromStr`, so a
//! bad value produces a 400 in the envelope rather than a rejection from
//! the JSON extractor.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use campus_core::error::AppError;
use campus_entity::attendance::model::{AttendanceFilter, AttendanceUpdate, StatsFilter};
use campus_entity::course::enrollment::{EnrollmentFilter, EnrollmentStatus, EnrollmentUpdate};
use campus_entity::course::model::{CourseFilter, CourseUpdate, NewCourse};
use campus_entity::event::model::{EventFilter, EventUpdate, NewEvent};
use campus_entity::user::model::{UserFilter, UserUpdate};
use campus_entity::user::UserRole;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Role, defaults to `student`.
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Parses the optional role, defaulting to student.
    pub fn parsed_role(&self) -> Result<UserRole, AppError> {
        match &self.role {
            Some(role) => role.parse(),
            None => Ok(UserRole::default()),
        }
    }
}

/// Password change request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Create user request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl CreateUserRequest {
    /// Parses the optional role, defaulting to student.
    pub fn parsed_role(&self) -> Result<UserRole, AppError> {
        match &self.role {
            Some(role) => role.parse(),
            None => Ok(UserRole::default()),
        }
    }
}

/// Partial user update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub avatar: Option<String>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            address: req.address,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            avatar: req.avatar,
        }
    }
}

/// User listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub search: Option<String>,
}

impl UserListQuery {
    /// Parses into a repository filter.
    pub fn into_filter(self) -> Result<UserFilter, AppError> {
        let role: Option<UserRole> = self.role.map(|r| r.parse()).transpose()?;
        Ok(UserFilter {
            role,
            search: self.search,
        })
    }
}

/// Create course request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Course code is required"))]
    pub course_code: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub category: Option<String>,
    pub instructor_id: i64,
    pub max_students: Option<i32>,
    #[validate(length(min = 1, message = "Semester is required"))]
    pub semester: String,
    #[validate(length(min = 1, message = "Academic year is required"))]
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1, message = "Schedule is required"))]
    pub schedule: String,
    pub location: Option<String>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(req: CreateCourseRequest) -> Self {
        Self {
            course_code: req.course_code,
            title: req.title,
            description: req.description,
            credits: req.credits.unwrap_or(3),
            category: req.category.unwrap_or_else(|| "Other".to_string()),
            instructor_id: req.instructor_id,
            max_students: req.max_students.unwrap_or(30),
            semester: req.semester,
            academic_year: req.academic_year,
            start_date: req.start_date,
            end_date: req.end_date,
            schedule: req.schedule,
            location: req.location,
        }
    }
}

/// Partial course update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
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

impl From<UpdateCourseRequest> for CourseUpdate {
    fn from(req: UpdateCourseRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            credits: req.credits,
            category: req.category,
            instructor_id: req.instructor_id,
            max_students: req.max_students,
            semester: req.semester,
            academic_year: req.academic_year,
            start_date: req.start_date,
            end_date: req.end_date,
            schedule: req.schedule,
            location: req.location,
        }
    }
}

/// Course listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseListQuery {
    pub category: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    pub search: Option<String>,
}

impl From<CourseListQuery> for CourseFilter {
    fn from(q: CourseListQuery) -> Self {
        Self {
            category: q.category,
            semester: q.semester,
            academic_year: q.academic_year,
            search: q.search,
        }
    }
}

/// Enrollment request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    /// The student to enroll.
    pub student_id: i64,
}

/// Create attendance record request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub date: NaiveDate,
    /// One of `present`, `absent`, `late`, `excused`.
    pub status: String,
    pub notes: Option<String>,
}

/// Partial attendance update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl UpdateAttendanceRequest {
    /// Parses into an entity update.
    pub fn into_update(self) -> Result<AttendanceUpdate, AppError> {
        let status: Option<campus_entity::attendance::AttendanceStatus> =
            self.status.map(|s| s.parse()).transpose()?;
        Ok(AttendanceUpdate {
            status,
            notes: self.notes,
        })
    }
}

/// Attendance listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceListQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl AttendanceListQuery {
    /// Parses into a repository filter.
    pub fn into_filter(self) -> Result<AttendanceFilter, AppError> {
        let status: Option<campus_entity::attendance::AttendanceStatus> =
            self.status.map(|s| s.parse()).transpose()?;
        Ok(AttendanceFilter {
            student_id: self.student_id,
            course_id: self.course_id,
            status,
            date: self.date,
            date_from: self.date_from,
            date_to: self.date_to,
        })
    }
}

/// Statistics query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    pub course_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl From<StatsQuery> for StatsFilter {
    fn from(q: StatsQuery) -> Self {
        Self {
            course_id: q.course_id,
            date: q.date,
            date_from: q.date_from,
            date_to: q.date_to,
        }
    }
}

/// Create performance record request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePerformanceRequest {
    pub student_id: i64,
    pub course_id: i64,
    /// One of `enrolled`, `completed`, `dropped`; defaults to `enrolled`.
    pub status: Option<String>,
    pub grade: Option<String>,
    pub final_score: Option<f64>,
}

impl CreatePerformanceRequest {
    /// Parses the optional status, defaulting to enrolled.
    pub fn parsed_status(&self) -> Result<EnrollmentStatus, AppError> {
        match &self.status {
            Some(status) => status.parse(),
            None => Ok(EnrollmentStatus::Enrolled),
        }
    }
}

/// Partial performance update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePerformanceRequest {
    pub status: Option<String>,
    pub grade: Option<String>,
    pub final_score: Option<f64>,
}

impl UpdatePerformanceRequest {
    /// Parses into an entity update.
    pub fn into_update(self) -> Result<EnrollmentUpdate, AppError> {
        let status: Option<EnrollmentStatus> = self.status.map(|s| s.parse()).transpose()?;
        Ok(EnrollmentUpdate {
            status,
            grade: self.grade,
            final_score: self.final_score,
        })
    }
}

/// Performance listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceListQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<String>,
}

impl PerformanceListQuery {
    /// Parses into a repository filter.
    pub fn into_filter(self) -> Result<EnrollmentFilter, AppError> {
        let status: Option<EnrollmentStatus> = self.status.map(|s| s.parse()).transpose()?;
        Ok(EnrollmentFilter {
            student_id: self.student_id,
            course_id: self.course_id,
            status,
        })
    }
}

/// Create post request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub tags: Option<Vec<String>>,
}

/// Partial post update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Create comment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub parent_id: Option<i64>,
}

/// Community feed query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PostListQuery {
    pub author_id: Option<i64>,
    pub search: Option<String>,
}

/// Create event request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    pub location: Option<String>,
    pub organizer_id: i64,
    pub max_attendees: Option<i32>,
    #[validate(length(min = 1, message = "Event type is required"))]
    pub event_type: String,
    pub is_public: Option<bool>,
    pub registration_required: Option<bool>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            event_date: req.event_date,
            location: req.location,
            organizer_id: req.organizer_id,
            max_attendees: req.max_attendees,
            event_type: req.event_type,
            is_public: req.is_public.unwrap_or(true),
            registration_required: req.registration_required.unwrap_or(false),
        }
    }
}

/// Partial event update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub max_attendees: Option<i32>,
    pub event_type: Option<String>,
    pub registration_required: Option<bool>,
}

impl From<UpdateEventRequest> for EventUpdate {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            event_date: req.event_date,
            location: req.location,
            max_attendees: req.max_attendees,
            event_type: req.event_type,
            registration_required: req.registration_required,
        }
    }
}

/// Event registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRegisterRequest {
    /// The user to register.
    pub user_id: i64,
}

/// Event listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct EventListQuery {
    pub event_type: Option<String>,
    pub organizer_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
}

impl From<EventListQuery> for EventFilter {
    fn from(q: EventListQuery) -> Self {
        Self {
            event_type: q.event_type,
            organizer_id: q.organizer_id,
            date_from: q.date_from,
            date_to: q.date_to,
            search: q.search,
        }
    }
}

/// Upcoming-events query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<u64>,
}

/// Runs `validator` checks, mapping failures to a 400 in the envelope.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}
