//! Identity token issuance and verification (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// Claims carried by the identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Signs and verifies compact expiring identity tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_days: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            expiry_days: config.token_expiry_days,
        }
    }

    /// Issue a token for the given user id.
    pub fn issue(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::days(self.expiry_days);

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode token: {}", e)))?;

        Ok((token, expires_at))
    }

    /// Verify a token string and return its claims.
    ///
    /// Expired or malformed tokens map to `Unauthorized`; the caller is
    /// responsible for checking that the referenced account still exists
    /// and is active.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Invalid token signature".to_string())
                }
                _ => AppError::Unauthorized("Invalid token".to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "test-secret-do-not-use".to_string(),
            token_expiry_days: 7,
        })
    }

    #[test]
    fn issued_token_verifies_with_same_subject() {
        let service = service();
        let user_id = Uuid::new_v4();

        let (token, expires_at) = service.issue(user_id).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = service();
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            token_expiry_days: 7,
        });

        let (token, _) = other.issue(Uuid::new_v4()).unwrap();
        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = service();
        assert!(matches!(
            service.verify("not.a.jwt").unwrap_err(),
            AppError::Unauthorized(_)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new(&AuthConfig {
            jwt_secret: "test-secret-do-not-use".to_string(),
            token_expiry_days: -1,
        });

        let (token, _) = service.issue(Uuid::new_v4()).unwrap();
        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
