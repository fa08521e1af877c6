//! Event repository implementation.

use sqlx::mysql::MySql;
use sqlx::{MySqlPool, QueryBuilder};

use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::types::pagination::{Page, PageRequest};
use campus_entity::event::model::{EventDetail, EventFilter, EventUpdate, NewEvent};
use campus_entity::event::registration::RegistrationDetail;
use campus_entity::event::Event;

/// Base SELECT joining the organizer's display name.
const DETAIL_SELECT: &str =
    "SELECT e.*, CONCAT(u.first_name, ' ', u.last_name) AS organizer_name \
     FROM events e JOIN users u ON e.organizer_id = u.id \
     WHERE e.is_public = 1";

/// Repository for event CRUD, listing, and registration operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: MySqlPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find a public event by primary key, without the organizer join.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ? AND is_public = 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find event by id", e)
            })
    }

    /// Find a public event joined with the organizer name.
    pub async fn find_detail(&self, id: i64) -> AppResult<Option<EventDetail>> {
        let sql = format!("{DETAIL_SELECT} AND e.id = ?");
        sqlx::query_as::<_, EventDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// List public events with optional filters, soonest first.
    pub async fn list(
        &self,
        filter: &EventFilter,
        page: &PageRequest,
    ) -> AppResult<Page<EventDetail>> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM events e WHERE e.is_public = 1");
        push_filter(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))?;

        let mut query: QueryBuilder<MySql> = QueryBuilder::new(DETAIL_SELECT);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY e.event_date ASC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let events = query
            .build_query_as::<EventDetail>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        Ok(Page::new(events, page.page, page.limit, total as u64))
    }

    /// List the next public events from today onward.
    pub async fn upcoming(&self, limit: u64) -> AppResult<Vec<EventDetail>> {
        let sql = format!("{DETAIL_SELECT} AND e.event_date >= CURDATE() ORDER BY e.event_date ASC LIMIT ?");
        sqlx::query_as::<_, EventDetail>(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list upcoming events", e)
            })
    }

    /// Create an event, returning its ID.
    pub async fn create(&self, data: &NewEvent) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO events (title, description, event_date, location, organizer_id, \
                                 max_attendees, event_type, is_public, registration_required) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.event_date)
        .bind(&data.location)
        .bind(data.organizer_id)
        .bind(data.max_attendees)
        .bind(&data.event_type)
        .bind(data.is_public)
        .bind(data.registration_required)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))?;

        Ok(result.last_insert_id() as i64)
    }

    /// Apply a partial update to a public event.
    pub async fn update(&self, id: i64, data: &EventUpdate) -> AppResult<()> {
        sqlx::query(
            "UPDATE events SET title = COALESCE(?, title), \
                               description = COALESCE(?, description), \
                               event_date = COALESCE(?, event_date), \
                               location = COALESCE(?, location), \
                               max_attendees = COALESCE(?, max_attendees), \
                               event_type = COALESCE(?, event_type), \
                               registration_required = COALESCE(?, registration_required), \
                               updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_public = 1",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.event_date)
        .bind(&data.location)
        .bind(data.max_attendees)
        .bind(&data.event_type)
        .bind(data.registration_required)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?;
        Ok(())
    }

    /// Soft-delete an event. Returns false when no public row matched.
    pub async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE events SET is_public = 0, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND is_public = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether the user already registered for the event.
    pub async fn is_registered(&self, event_id: i64, user_id: i64) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM event_registrations WHERE event_id = ? AND user_id = ? LIMIT 1",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check registration", e)
        })?;
        Ok(existing.is_some())
    }

    /// Register a user: insert the registration row and bump the attendee
    /// counter in one transaction.
    pub async fn register(&self, event_id: i64, user_id: i64) -> AppResult<i64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "INSERT INTO event_registrations (event_id, user_id, status) \
             VALUES (?, ?, 'registered')",
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("User is already registered for this event")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create registration", e),
        })?;

        sqlx::query(
            "UPDATE events SET current_attendees = current_attendees + 1, \
                               updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update attendee count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        Ok(result.last_insert_id() as i64)
    }

    /// List an event's registrations joined with attendee fields.
    pub async fn registrations(&self, event_id: i64) -> AppResult<Vec<RegistrationDetail>> {
        sqlx::query_as::<_, RegistrationDetail>(
            "SELECT er.*, u.first_name, u.last_name, u.email, u.avatar \
             FROM event_registrations er \
             JOIN users u ON er.user_id = u.id \
             WHERE er.event_id = ? \
             ORDER BY er.registration_date ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list registrations", e)
        })
    }
}

/// Append filter conditions to an event query.
fn push_filter<'a>(query: &mut QueryBuilder<'a, MySql>, filter: &'a EventFilter) {
    if let Some(event_type) = &filter.event_type {
        query.push(" AND e.event_type = ").push_bind(event_type);
    }
    if let Some(organizer_id) = filter.organizer_id {
        query.push(" AND e.organizer_id = ").push_bind(organizer_id);
    }
    if let Some(date_from) = filter.date_from {
        query.push(" AND e.event_date >= ").push_bind(date_from);
    }
    if let Some(date_to) = filter.date_to {
        query.push(" AND e.event_date <= ").push_bind(date_to);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query
            .push(" AND (e.title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR e.description LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
