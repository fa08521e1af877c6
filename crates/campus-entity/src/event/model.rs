//! Campus event model.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A campus event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// When the event takes place (local campus time).
    pub event_date: NaiveDateTime,
    pub location: Option<String>,
    /// The user organizing the event.
    pub organizer_id: i64,
    /// Attendance cap; `None` means unlimited.
    pub max_attendees: Option<i32>,
    /// Currently registered count, maintained by the register flow.
    pub current_attendees: i32,
    /// Event kind, e.g. `workshop`, `seminar`, `social`.
    pub event_type: String,
    /// Soft-delete flag; non-public events are invisible to reads.
    pub is_public: bool,
    /// Whether attendees must register in advance.
    pub registration_required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event has reached its attendance cap.
    ///
    /// Events without a cap are never full.
    pub fn is_full(&self) -> bool {
        match self.max_attendees {
            Some(max) => self.current_attendees >= max,
            None => false,
        }
    }
}

/// An event joined with the organizer's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub organizer_name: Option<String>,
}

/// Data required to create an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    pub location: Option<String>,
    pub organizer_id: i64,
    pub max_attendees: Option<i32>,
    pub event_type: String,
    pub is_public: bool,
    pub registration_required: bool,
}

/// Partial update of an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub max_attendees: Option<i32>,
    pub event_type: Option<String>,
    pub registration_required: Option<bool>,
}

impl EventUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.event_date.is_none()
            && self.location.is_none()
            && self.max_attendees.is_none()
            && self.event_type.is_none()
            && self.registration_required.is_none()
    }
}

/// Optional filters for event listings.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub event_type: Option<String>,
    pub organizer_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Substring match on title or description.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(current: i32, max: Option<i32>) -> Event {
        Event {
            id: 1,
            title: "Career Fair".into(),
            description: None,
            event_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 15)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            location: None,
            organizer_id: 2,
            max_attendees: max,
            current_attendees: current,
            event_type: "fair".into(),
            is_public: true,
            registration_required: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_full_with_cap() {
        assert!(!event(99, Some(100)).is_full());
        assert!(event(100, Some(100)).is_full());
    }

    #[test]
    fn test_uncapped_event_never_full() {
        assert!(!event(10_000, None).is_full());
    }
}
