use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::files::models::FileRecord;
use crate::shared::types::{PageInfo, PaginationQuery};

/// File kind, derived from the MIME type at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Audio,
    Document,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Document => "document",
        }
    }

    /// Derive the file kind from a MIME type prefix; anything that is not
    /// image, video, or audio is a document.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            FileType::Image
        } else if mime_type.starts_with("video/") {
            FileType::Video
        } else if mime_type.starts_with("audio/") {
            FileType::Audio
        } else {
            FileType::Document
        }
    }

    fn from_stored(value: &str) -> Self {
        match value {
            "image" => FileType::Image,
            "video" => FileType::Video,
            "audio" => FileType::Audio,
            _ => FileType::Document,
        }
    }
}

/// File category chosen by the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Personal,
    Work,
    Education,
    Entertainment,
    #[default]
    Other,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Personal => "personal",
            FileCategory::Work => "work",
            FileCategory::Education => "education",
            FileCategory::Entertainment => "entertainment",
            FileCategory::Other => "other",
        }
    }

    /// Parse a category from form input; unknown values fall back to `other`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "personal" => FileCategory::Personal,
            "work" => FileCategory::Work,
            "education" => FileCategory::Education,
            "entertainment" => FileCategory::Entertainment,
            _ => FileCategory::Other,
        }
    }

    fn from_stored(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

/// Sort key for listings; `relevance` is only meaningful with a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Relevance,
    #[default]
    Date,
    Name,
    Size,
    Views,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Title (defaults to the filename without extension)
    #[schema(example = "Vacation Photo")]
    pub title: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Comma-separated tags, stored lowercase, at most 10
    #[schema(example = "beach,summer")]
    pub tags: Option<String>,
    /// Category: personal, work, education, entertainment, or other
    #[schema(example = "personal")]
    pub category: Option<String>,
    /// Whether the file is readable by other users
    #[schema(example = "false")]
    pub is_public: Option<String>,
}

/// Metadata edit request; only these five fields are mutable.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFileDto {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    /// Replacement tag list (comma-separated)
    pub tags: Option<String>,
    pub category: Option<FileCategory>,
    pub is_public: Option<bool>,
}

/// Optional media metadata captured at upload time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileMetadataDto {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<f64>,
    pub bitrate: Option<i32>,
    pub format: Option<String>,
}

/// Public projection of a file record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_name: String,
    pub url: String,
    pub secure_url: String,
    pub file_type: FileType,
    pub mime_type: String,
    pub size: i64,
    pub tags: Vec<String>,
    pub category: FileCategory,
    pub is_public: bool,
    pub view_count: i64,
    pub download_count: i64,
    pub owner_id: Uuid,
    pub metadata: FileMetadataDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FileRecord> for FileResponseDto {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            original_name: record.original_name,
            url: record.url,
            secure_url: record.secure_url,
            file_type: FileType::from_stored(&record.file_type),
            mime_type: record.mime_type,
            size: record.size,
            tags: record.tags,
            category: FileCategory::from_stored(&record.category),
            is_public: record.is_public,
            view_count: record.view_count,
            download_count: record.download_count,
            owner_id: record.owner_id,
            metadata: FileMetadataDto {
                width: record.width,
                height: record.height,
                duration: record.duration,
                bitrate: record.bitrate,
                format: record.format,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    crate::shared::constants::DEFAULT_PAGE_SIZE
}

/// Query parameters for `GET /api/files`
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListFilesQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page (max 50)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 50)]
    pub limit: i64,
    pub file_type: Option<FileType>,
    pub category: Option<FileCategory>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ListFilesQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for ListFilesQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            file_type: None,
            category: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Query parameters for `GET /api/files/search`
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchFilesQuery {
    /// Free-text search term
    pub q: Option<String>,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page (max 50)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 50)]
    pub limit: i64,
    pub file_type: Option<FileType>,
    pub category: Option<FileCategory>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl SearchFilesQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for SearchFilesQuery {
    fn default() -> Self {
        Self {
            q: None,
            page: default_page(),
            limit: default_limit(),
            file_type: None,
            category: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Paged listing/search response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponseDto {
    pub files: Vec<FileResponseDto>,
    pub pagination: PageInfo,
}

/// View counter response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ViewCountDto {
    pub view_count: i64,
}

/// Per-type aggregate for the stats endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileStatsEntryDto {
    pub file_type: FileType,
    pub count: i64,
    pub total_size: i64,
    pub total_views: i64,
}

/// Aggregate stats over all files owned by the caller
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileStatsDto {
    pub by_type: Vec<FileStatsEntryDto>,
    pub total_files: i64,
    pub total_size: i64,
}

impl FileStatsEntryDto {
    pub fn new(file_type: &str, count: i64, total_size: i64, total_views: i64) -> Self {
        Self {
            file_type: FileType::from_stored(file_type),
            count,
            total_size,
            total_views,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_follows_mime_prefix() {
        assert_eq!(FileType::from_mime("image/jpeg"), FileType::Image);
        assert_eq!(FileType::from_mime("video/webm"), FileType::Video);
        assert_eq!(FileType::from_mime("audio/ogg"), FileType::Audio);
        assert_eq!(FileType::from_mime("application/pdf"), FileType::Document);
        assert_eq!(FileType::from_mime("text/plain"), FileType::Document);
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        assert_eq!(FileCategory::parse_lenient("Work"), FileCategory::Work);
        assert_eq!(FileCategory::parse_lenient("  education  "), FileCategory::Education);
        assert_eq!(FileCategory::parse_lenient("misc"), FileCategory::Other);
        assert_eq!(FileCategory::parse_lenient(""), FileCategory::Other);
    }
}
