use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto, UpdateProfileDto, UserResponseDto,
};
use crate::features::auth::models::{AuthenticatedUser, User};
use crate::features::auth::services::password;
use crate::features::auth::services::TokenService;
use crate::shared::constants::ROLE_USER;

/// Identity and session management: registration, login, token
/// verification, profile mutation.
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Register a new account and issue a token immediately.
    ///
    /// Emails are stored lowercase; duplicates (case-insensitive) are a Conflict.
    pub async fn register(&self, dto: RegisterDto) -> Result<AuthResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = password::hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dto.name.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(ROLE_USER)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Lost the insert race with a concurrent registration
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("An account with this email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        info!("User registered: id={}, email={}", user.id, user.email);

        let (token, expires_at) = self.token_service.issue(user.id)?;

        Ok(AuthResponseDto {
            user: user.into(),
            token,
            expires_at,
        })
    }

    /// Authenticate with email + password.
    ///
    /// Missing account, deactivated account, and wrong password all collapse
    /// into one generic error so callers cannot enumerate users.
    pub async fn login(&self, dto: LoginDto) -> Result<AuthResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        if !user.is_active {
            return Err(Self::invalid_credentials());
        }

        if !password::verify_password(&dto.password, &user.password_hash)? {
            return Err(Self::invalid_credentials());
        }

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET last_login = $1, updated_at = $1 WHERE id = $2 RETURNING *",
        )
        .bind(Utc::now())
        .bind(user.id)
        .fetch_one(&self.pool)
        .await?;

        info!("User logged in: id={}", user.id);

        let (token, expires_at) = self.token_service.issue(user.id)?;

        Ok(AuthResponseDto {
            user: user.into(),
            token,
            expires_at,
        })
    }

    fn invalid_credentials() -> AppError {
        AppError::Unauthorized("Invalid credentials".to_string())
    }

    /// Verify a bearer token and resolve it to a live, active account.
    ///
    /// Used by the auth middleware on every protected request.
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.token_service.verify(token)?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        if !user.is_active {
            return Err(AppError::Unauthorized(
                "Account has been deactivated".to_string(),
            ));
        }

        Ok(AuthenticatedUser::from(&user))
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponseDto> {
        let user = self.fetch_user(user_id).await?;
        Ok(user.into())
    }

    /// Update name and/or avatar; all other account fields are immutable here.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                avatar = COALESCE($2, avatar),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.avatar.as_deref())
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        info!("Profile updated: id={}", user.id);

        Ok(user.into())
    }

    /// Change the account password after verifying the current one.
    pub async fn change_password(&self, user_id: Uuid, dto: ChangePasswordDto) -> Result<()> {
        let user = self.fetch_user(user_id).await?;

        if !password::verify_password(&dto.current_password, &user.password_hash)? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = password::hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!("Password changed: id={}", user_id);

        Ok(())
    }

    async fn fetch_user(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
