use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// File metadata row as stored in the database.
///
/// `file_type`, `category`, and `resource_type` are stored as plain text and
/// converted to their enums at the DTO layer. `seq` is the insertion-order
/// serial used as the deterministic tie-break when relevance scores are equal.
#[derive(Debug, Clone, FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    pub seq: i64,
    pub title: String,
    pub description: Option<String>,
    pub original_name: String,
    pub storage_key: String,
    pub resource_type: String,
    pub url: String,
    pub secure_url: String,
    pub file_type: String,
    pub mime_type: String,
    pub size: i64,
    pub tags: Vec<String>,
    pub category: String,
    pub is_public: bool,
    pub view_count: i64,
    pub download_count: i64,
    pub owner_id: Uuid,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<f64>,
    pub bitrate: Option<i32>,
    pub format: Option<String>,
    /// Derived token set; always a pure function of the text fields at last save
    pub search_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
