//! Performance handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;
use campus_core::types::pagination::Page;
use campus_core::types::response::Envelope;
use campus_entity::course::enrollment::{EnrollmentDetail, NewEnrollment, PerformanceStats};

use crate::dto::request::{
    CreatePerformanceRequest, PerformanceListQuery, UpdatePerformanceRequest,
};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/performance
pub async fn list_records(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<PerformanceListQuery>,
) -> Result<Json<Envelope<Page<EnrollmentDetail>>>, AppError> {
    let filter = query.into_filter()?;

    let records = state
        .performance_service
        .list(&filter, &page.into_page_request())
        .await?;

    Ok(Json(Envelope::ok(
        "Performance records retrieved successfully",
        records,
    )))
}

/// GET /api/performance/{id}
pub async fn get_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<EnrollmentDetail>>, AppError> {
    let record = state.performance_service.get(id).await?;

    Ok(Json(Envelope::ok(
        "Performance record retrieved successfully",
        record,
    )))
}

/// POST /api/performance
pub async fn create_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreatePerformanceRequest>,
) -> Result<Json<Envelope<EnrollmentDetail>>, AppError> {
    let status = req.parsed_status()?;

    let record = state
        .performance_service
        .create(NewEnrollment {
            student_id: req.student_id,
            course_id: req.course_id,
            status,
            grade: req.grade,
            final_score: req.final_score,
        })
        .await?;

    Ok(Json(Envelope::ok(
        "Performance record created successfully",
        record,
    )))
}

/// PUT /api/performance/{id}
pub async fn update_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePerformanceRequest>,
) -> Result<Json<Envelope<EnrollmentDetail>>, AppError> {
    let update = req.into_update()?;

    let record = state.performance_service.update(id, &update).await?;

    Ok(Json(Envelope::ok(
        "Performance record updated successfully",
        record,
    )))
}

/// DELETE /api/performance/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.performance_service.delete(id).await?;

    Ok(Json(Envelope::ok_empty(
        "Performance record deleted successfully",
    )))
}

/// GET /api/performance/students/{id}/stats
pub async fn student_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<PerformanceStats>>, AppError> {
    let stats = state.performance_service.student_stats(id).await?;

    Ok(Json(Envelope::ok(
        "Student performance statistics retrieved successfully",
        stats,
    )))
}
