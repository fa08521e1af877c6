//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::MySqlPool;

use campus_auth::AuthService;
use campus_core::config::AppConfig;
use campus_service::attendance::AttendanceService;
use campus_service::community::CommunityService;
use campus_service::course::CourseService;
use campus_service::event::EventService;
use campus_service::performance::PerformanceService;
use campus_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// MySQL connection pool
    pub db_pool: MySqlPool,

    /// Authentication service (login, register, token verification)
    pub auth_service: Arc<AuthService>,
    /// User service
    pub user_service: Arc<UserService>,
    /// Course service
    pub course_service: Arc<CourseService>,
    /// Attendance service
    pub attendance_service: Arc<AttendanceService>,
    /// Performance service
    pub performance_service: Arc<PerformanceService>,
    /// Community service
    pub community_service: Arc<CommunityService>,
    /// Event service
    pub event_service: Arc<EventService>,
}
