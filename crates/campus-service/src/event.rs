//! Event management and registration operations.

use std::sync::Arc;

use tracing::info;

use campus_core::error::AppError;
use campus_core::types::pagination::{Page, PageRequest};
use campus_database::repositories::event::EventRepository;
use campus_entity::event::model::{EventDetail, EventFilter, EventUpdate, NewEvent};
use campus_entity::event::registration::RegistrationDetail;

/// Default size of the upcoming-events listing.
const DEFAULT_UPCOMING_LIMIT: u64 = 5;

/// Handles campus events and the registration flow.
#[derive(Debug, Clone)]
pub struct EventService {
    events: Arc<EventRepository>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<EventRepository>) -> Self {
        Self { events }
    }

    /// Lists public events with filters and pagination.
    pub async fn list(
        &self,
        filter: &EventFilter,
        page: &PageRequest,
    ) -> Result<Page<EventDetail>, AppError> {
        self.events.list(filter, page).await
    }

    /// Lists the next public events from today onward.
    pub async fn upcoming(&self, limit: Option<u64>) -> Result<Vec<EventDetail>, AppError> {
        self.events
            .upcoming(limit.unwrap_or(DEFAULT_UPCOMING_LIMIT))
            .await
    }

    /// Fetches one public event with the organizer name.
    pub async fn get(&self, id: i64) -> Result<EventDetail, AppError> {
        self.events
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event with this ID does not exist"))
    }

    /// Creates an event.
    pub async fn create(&self, data: NewEvent) -> Result<EventDetail, AppError> {
        let id = self.events.create(&data).await?;

        info!(event_id = id, organizer_id = data.organizer_id, "Event created");

        self.get(id).await
    }

    /// Applies a partial update and returns the refreshed row.
    pub async fn update(&self, id: i64, data: &EventUpdate) -> Result<EventDetail, AppError> {
        self.get(id).await?;

        if data.is_empty() {
            return Err(AppError::validation(
                "Please provide at least one valid field",
            ));
        }

        self.events.update(id, data).await?;
        self.get(id).await
    }

    /// Soft-deletes an event.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.events.soft_delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Event with this ID does not exist"));
        }

        info!(event_id = id, "Event deleted");
        Ok(())
    }

    /// Registers a user for an event.
    ///
    /// Unknown event is 404, a full event is 400, a duplicate registration
    /// is 409. The insert and attendee-counter bump run in one transaction.
    pub async fn register(&self, event_id: i64, user_id: i64) -> Result<(), AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event with this ID does not exist"))?;

        if event.is_full() {
            return Err(AppError::validation(
                "This event has reached maximum capacity",
            ));
        }

        if self.events.is_registered(event_id, user_id).await? {
            return Err(AppError::conflict(
                "User is already registered for this event",
            ));
        }

        self.events.register(event_id, user_id).await?;

        info!(event_id, user_id, "User registered for event");
        Ok(())
    }

    /// Lists an event's registrations.
    pub async fn registrations(&self, event_id: i64) -> Result<Vec<RegistrationDetail>, AppError> {
        self.get(event_id).await?;
        self.events.registrations(event_id).await
    }
}
