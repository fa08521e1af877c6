//! Course handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;
use campus_core::types::pagination::Page;
use campus_core::types::response::Envelope;
use campus_entity::course::model::CourseDetail;
use campus_entity::course::EnrolledStudent;

use crate::dto::request::{
    CourseListQuery, CreateCourseRequest, EnrollRequest, UpdateCourseRequest, validated,
};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Envelope<Page<CourseDetail>>>, AppError> {
    let courses = state
        .course_service
        .list(&query.into(), &page.into_page_request())
        .await?;

    Ok(Json(Envelope::ok("Courses retrieved successfully", courses)))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<CourseDetail>>, AppError> {
    let course = state.course_service.get(id).await?;

    Ok(Json(Envelope::ok("Course retrieved successfully", course)))
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<Envelope<CourseDetail>>, AppError> {
    let req = validated(req)?;

    let course = state.course_service.create(req.into()).await?;

    Ok(Json(Envelope::ok("Course created successfully", course)))
}

/// PUT /api/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<Envelope<CourseDetail>>, AppError> {
    let course = state.course_service.update(id, &req.into()).await?;

    Ok(Json(Envelope::ok("Course updated successfully", course)))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.course_service.delete(id).await?;

    Ok(Json(Envelope::ok_empty("Course deleted successfully")))
}

/// POST /api/courses/{id}/enroll
pub async fn enroll_student(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<EnrollRequest>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.course_service.enroll(id, req.student_id).await?;

    Ok(Json(Envelope::ok_empty("Student enrolled successfully")))
}

/// GET /api/courses/{id}/students
pub async fn enrolled_students(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Vec<EnrolledStudent>>>, AppError> {
    let students = state.course_service.students(id).await?;

    Ok(Json(Envelope::ok(
        "Enrolled students retrieved successfully",
        students,
    )))
}
