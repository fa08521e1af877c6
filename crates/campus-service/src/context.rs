//! Per-request caller context.

use campus_entity::user::{User, UserRole};

/// Identity of the authenticated caller, derived from a verified token
/// and the loaded user row.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The caller's user ID.
    pub user_id: i64,
    /// The caller's email.
    pub email: String,
    /// The caller's role.
    pub role: UserRole,
}

impl RequestContext {
    /// Builds a context from a loaded user row.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }

    /// Whether the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
