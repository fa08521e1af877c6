//! Event handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use campus_core::error::AppError;
use campus_core::types::pagination::Page;
use campus_core::types::response::Envelope;
use campus_entity::event::model::EventDetail;
use campus_entity::event::registration::RegistrationDetail;

use crate::dto::request::{
    CreateEventRequest, EventListQuery, EventRegisterRequest, UpcomingQuery, UpdateEventRequest,
    validated,
};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Envelope<Page<EventDetail>>>, AppError> {
    let events = state
        .event_service
        .list(&query.into(), &page.into_page_request())
        .await?;

    Ok(Json(Envelope::ok("Events retrieved successfully", events)))
}

/// GET /api/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Envelope<Vec<EventDetail>>>, AppError> {
    let events = state.event_service.upcoming(query.limit).await?;

    Ok(Json(Envelope::ok(
        "Upcoming events retrieved successfully",
        events,
    )))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<EventDetail>>, AppError> {
    let event = state.event_service.get(id).await?;

    Ok(Json(Envelope::ok("Event retrieved successfully", event)))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<Envelope<EventDetail>>, AppError> {
    let req = validated(req)?;

    let event = state.event_service.create(req.into()).await?;

    Ok(Json(Envelope::ok("Event created successfully", event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Envelope<EventDetail>>, AppError> {
    let event = state.event_service.update(id, &req.into()).await?;

    Ok(Json(Envelope::ok("Event updated successfully", event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.event_service.delete(id).await?;

    Ok(Json(Envelope::ok_empty("Event deleted successfully")))
}

/// POST /api/events/{id}/register
pub async fn register_for_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<EventRegisterRequest>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    state.event_service.register(id, req.user_id).await?;

    Ok(Json(Envelope::ok_empty(
        "User registered for event successfully",
    )))
}

/// GET /api/events/{id}/registrations
pub async fn event_registrations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Vec<RegistrationDetail>>>, AppError> {
    let registrations = state.event_service.registrations(id).await?;

    Ok(Json(Envelope::ok(
        "Event registrations retrieved successfully",
        registrations,
    )))
}
