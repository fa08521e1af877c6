//! User entity: account model, role enum, and profile rows.

pub mod model;
pub mod profile;
pub mod role;

pub use model::{NewUser, User, UserFilter, UserUpdate};
pub use profile::UserProfile;
pub use role::UserRole;
