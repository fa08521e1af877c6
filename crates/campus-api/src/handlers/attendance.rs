//! Attendance handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;
use campus_core::types::pagination::Page;
use campus_core::types::response::Envelope;
use campus_entity::attendance::model::{AttendanceDetail, AttendanceStats, NewAttendance};

use crate::dto::request::{
    AttendanceListQuery, CreateAttendanceRequest, StatsQuery, UpdateAttendanceRequest,
};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/attendance
pub async fn list_records(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<AttendanceListQuery>,
) -> Result<Json<Envelope<Page<AttendanceDetail>>>, AppError> {
    let filter = query.into_filter()?;

    let records = state
        .attendance_service
        .list(&filter, &page.into_page_request())
        .await?;

    Ok(Json(Envelope::ok(
        "Attendance records retrieved successfully",
        records,
    )))
}

/// GET /api/attendance/{id}
pub async fn get_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<AttendanceDetail>>, AppError> {
    let record = state.attendance_service.get(id).await?;

    Ok(Json(Envelope::ok(
        "Attendance record retrieved successfully",
        record,
    )))
}

/// POST /api/attendance
///
/// The authenticated caller is recorded as the entry's author.
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAttendanceRequest>,
) -> Result<Json<Envelope<AttendanceDetail>>, AppError> {
    let status = req.status.parse()?;

    let record = state
        .attendance_service
        .create(NewAttendance {
            student_id: req.student_id,
            course_id: req.course_id,
            date: req.date,
            status,
            notes: req.notes,
            recorded_by: auth.user.id,
        })
        .await?;

    Ok(Json(Envelope::ok(
        "Attendance record created successfully",
        record,
    )))
}

/// PUT /api/attendance/{id}
pub async fn update_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAttendanceRequest>,
) -> Result<Json<Envelope<AttendanceDetail>>, AppError> {
    let update = req.into_update()?;

    let record = state.attendance_service.update(id, &update).await?;

    Ok(Json(Envelope::ok(
        "Attendance record updated successfully",
        record,
    )))
}

/// DELETE /api/attendance/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.attendance_service.delete(id).await?;

    Ok(Json(Envelope::ok_empty(
        "Attendance record deleted successfully",
    )))
}

/// GET /api/attendance/students/{id}/stats
pub async fn student_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Envelope<AttendanceStats>>, AppError> {
    let stats = state
        .attendance_service
        .student_stats(id, &query.into())
        .await?;

    Ok(Json(Envelope::ok(
        "Attendance statistics retrieved successfully",
        stats,
    )))
}

/// GET /api/attendance/courses/{id}/stats
pub async fn course_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Envelope<AttendanceStats>>, AppError> {
    let stats = state
        .attendance_service
        .course_stats(id, &query.into())
        .await?;

    Ok(Json(Envelope::ok(
        "Course attendance statistics retrieved successfully",
        stats,
    )))
}
