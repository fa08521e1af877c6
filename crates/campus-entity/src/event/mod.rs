//! Event entity: campus events and registrations.

pub mod model;
pub mod registration;

pub use model::{Event, EventDetail, EventFilter, EventUpdate, NewEvent};
pub use registration::{EventRegistration, RegistrationDetail, RegistrationStatus};
