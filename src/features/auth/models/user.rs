use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::ROLE_ADMIN;

/// Account row as stored in the database.
///
/// `password_hash` never leaves this layer; outward serialization goes
/// through `UserResponseDto`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub role: String,
    pub is_active: bool,
    /// Number of files currently owned; maintained only by the file lifecycle manager
    pub total_files: i64,
    /// Bytes of storage currently used; maintained only by the file lifecycle manager
    pub storage_used: i64,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Identity attached to the request after the bearer token has been
/// verified and the account confirmed active.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    #[allow(dead_code)]
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}
