//! User management operations.

use std::sync::Arc;

use tracing::info;

use campus_auth::password::{PasswordHasher, PasswordValidator};
use campus_core::error::AppError;
use campus_core::types::pagination::{Page, PageRequest};
use campus_database::repositories::user::UserRepository;
use campus_entity::user::model::{NewUser, UserFilter, UserUpdate};
use campus_entity::user::profile::UserProfile;
use campus_entity::user::User;

/// Handles user listing, CRUD, profiles, and password changes.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

/// Data accepted when an authenticated caller creates a user directly.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: campus_entity::user::UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Lists active users with filters and pagination.
    pub async fn list(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> Result<Page<User>, AppError> {
        self.users.list(filter, page).await
    }

    /// Fetches one active user.
    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User with this ID does not exist"))
    }

    /// Creates a user, enforcing uniqueness and the password policy.
    pub async fn create(&self, data: CreateUser) -> Result<User, AppError> {
        if self
            .users
            .email_or_username_taken(&data.email, &data.username)
            .await?
        {
            return Err(AppError::conflict("Email or username is already taken"));
        }

        self.validator.validate(&data.password)?;
        let password_hash = self.hasher.hash_password(&data.password)?;

        let id = self
            .users
            .create(&NewUser {
                username: data.username,
                email: data.email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
                role: data.role,
                phone: data.phone,
                address: data.address,
                date_of_birth: data.date_of_birth,
                gender: data.gender,
            })
            .await?;

        info!(user_id = id, "User created");

        self.get(id).await
    }

    /// Applies a partial update and returns the refreshed row.
    pub async fn update(&self, id: i64, data: &UserUpdate) -> Result<User, AppError> {
        // Existence first, so a vanished row reads as 404 rather than a no-op.
        self.get(id).await?;

        if data.is_empty() {
            return Err(AppError::validation(
                "Please provide at least one valid field",
            ));
        }

        self.users.update(id, data).await?;
        self.get(id).await
    }

    /// Soft-deletes a user.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.users.soft_delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("User with this ID does not exist"));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Fetches the extended profile with student/faculty rows joined in.
    pub async fn profile(&self, id: i64) -> Result<UserProfile, AppError> {
        self.users
            .find_profile(id)
            .await?
            .ok_or_else(|| AppError::not_found("User with this ID does not exist"))
    }

    /// Changes a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get(id).await?;

        let valid = self
            .hasher
            .verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(id, &new_hash).await?;

        info!(user_id = id, "Password changed");
        Ok(())
    }
}
