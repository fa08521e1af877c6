//! Authentication flows: registration, login, and token verification.

use std::sync::Arc;

use tracing::info;

use campus_core::config::auth::AuthConfig;
use campus_core::error::AppError;
use campus_database::repositories::user::UserRepository;
use campus_entity::user::model::NewUser;
use campus_entity::user::{User, UserRole};

use crate::jwt::{IssuedToken, JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordValidator};

/// Data submitted at registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated user.
    pub user: User,
    /// Their freshly issued token.
    pub issued: IssuedToken,
}

/// Drives login, registration, and token verification.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl AuthService {
    /// Creates a new auth service from configuration.
    pub fn new(users: Arc<UserRepository>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Registers a new account and issues a token for it.
    pub async fn register(&self, reg: Registration) -> Result<AuthOutcome, AppError> {
        if self
            .users
            .email_or_username_taken(&reg.email, &reg.username)
            .await?
        {
            return Err(AppError::conflict("Email or username is already taken"));
        }

        self.validator.validate(&reg.password)?;
        let password_hash = self.hasher.hash_password(&reg.password)?;

        let id = self
            .users
            .create(&NewUser {
                username: reg.username,
                email: reg.email,
                password_hash,
                first_name: reg.first_name,
                last_name: reg.last_name,
                role: reg.role,
                phone: None,
                address: None,
                date_of_birth: None,
                gender: None,
            })
            .await?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created user could not be re-read"))?;

        let issued = self.encoder.generate_token(&user)?;

        info!(user_id = user.id, role = %user.role, "User registered");

        Ok(AuthOutcome { user, issued })
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown email, inactive account, and wrong password all produce the
    /// same error so callers cannot probe which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Email or password is incorrect"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Email or password is incorrect"));
        }

        let issued = self.encoder.generate_token(&user)?;

        info!(user_id = user.id, "User logged in");

        Ok(AuthOutcome { user, issued })
    }

    /// Decodes a bearer token and loads the account it names.
    ///
    /// Tokens for deleted or deactivated accounts are rejected.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decoder.decode_token(token)?;

        self.users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User account not found or inactive"))
    }
}
