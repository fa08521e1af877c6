//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use campus_core::config::auth::AuthConfig;
use campus_core::error::AppError;

use super::claims::Claims;

/// Validates JWT bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks signature validity and expiration.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use campus_entity::user::{User, UserRole};
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_days: 7,
            password_min_length: 8,
        }
    }

    fn test_user() -> User {
        User {
            id: 42,
            username: "jdoe".into(),
            email: "jdoe@campus.edu".into(),
            password_hash: String::new(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            role: UserRole::Student,
            phone: None,
            address: None,
            date_of_birth: None,
            gender: None,
            avatar: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let config = test_config();
        let issued = JwtEncoder::new(&config)
            .generate_token(&test_user())
            .unwrap();

        let claims = JwtDecoder::new(&config).decode_token(&issued.token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "jdoe@campus.edu");
        assert_eq!(claims.role, UserRole::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = crate::jwt::Claims {
            sub: 42,
            email: "jdoe@campus.edu".into(),
            role: UserRole::Student,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = JwtDecoder::new(&config).decode_token(&token).unwrap_err();
        assert_eq!(err.kind, campus_core::error::ErrorKind::Authentication);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let config = test_config();
        let issued = JwtEncoder::new(&config)
            .generate_token(&test_user())
            .unwrap();

        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..test_config()
        };
        let err = JwtDecoder::new(&other).decode_token(&issued.token).unwrap_err();
        assert_eq!(err.kind, campus_core::error::ErrorKind::Authentication);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = test_config();
        assert!(JwtDecoder::new(&config).decode_token("not.a.token").is_err());
        assert!(JwtDecoder::new(&config).decode_token("").is_err());
    }
}
