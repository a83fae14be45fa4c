use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::files::dtos::{
    FileListResponseDto, FileResponseDto, FileStatsDto, ListFilesQuery, SearchFilesQuery,
    UpdateFileDto, UploadFileDto, ViewCountDto,
};
use crate::features::files::services::{FileService, SearchService, UploadRequest};
use crate::shared::types::ApiResponse;

/// Upload a file
///
/// Accepts multipart/form-data with:
/// - `file`: The file to upload (required)
/// - `title`: Display title (optional, defaults to the filename)
/// - `description`: Free-text description (optional)
/// - `tags`: Comma-separated tags (optional)
/// - `category`: personal/work/education/entertainment/other (optional)
/// - `is_public`: "true" to make the file readable by others (optional)
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form with optional metadata fields",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Missing file or validation error"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "File too large")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponseDto>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut tags: Option<String> = None;
    let mut category: Option<String> = None;
    let mut is_public = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "title" => title = Some(read_text_field(field, "title").await?),
            "description" => description = Some(read_text_field(field, "description").await?),
            "tags" => tags = Some(read_text_field(field, "tags").await?),
            "category" => category = Some(read_text_field(field, "category").await?),
            "is_public" => {
                let text = read_text_field(field, "is_public").await?;
                is_public = matches!(text.trim().to_lowercase().as_str(), "true" | "1" | "yes");
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    let file = service
        .upload(
            user.id,
            UploadRequest {
                original_name: file_name,
                content_type,
                data: file_data,
                title,
                description,
                tags,
                category,
                is_public,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(file),
            Some("File uploaded successfully".to_string()),
        )),
    ))
}

/// List the caller's files with optional filters and sorting
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Paged file listing", body = ApiResponse<FileListResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_files(
    user: AuthenticatedUser,
    State(service): State<Arc<SearchService>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<FileListResponseDto>>, AppError> {
    let result = service.list(user.id, &query).await?;
    Ok(Json(ApiResponse::success(Some(result), None)))
}

/// Search the caller's files with relevance ranking
#[utoipa::path(
    get,
    path = "/api/files/search",
    tag = "files",
    params(SearchFilesQuery),
    responses(
        (status = 200, description = "Ranked search results", body = ApiResponse<FileListResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_files(
    user: AuthenticatedUser,
    State(service): State<Arc<SearchService>>,
    Query(query): Query<SearchFilesQuery>,
) -> Result<Json<ApiResponse<FileListResponseDto>>, AppError> {
    let result = service.search(user.id, &query).await?;
    Ok(Json(ApiResponse::success(Some(result), None)))
}

/// Aggregate stats over the caller's files, grouped by file type
#[utoipa::path(
    get,
    path = "/api/files/stats",
    tag = "files",
    responses(
        (status = 200, description = "Aggregate file statistics", body = ApiResponse<FileStatsDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn file_stats(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<FileStatsDto>>, AppError> {
    let stats = service.stats(user.id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None)))
}

/// Get one file by id (owner or public)
#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "files",
    params(("id" = Uuid, Path, description = "File ID")),
    responses(
        (status = 200, description = "File found", body = ApiResponse<FileResponseDto>),
        (status = 404, description = "File not found or not accessible")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileResponseDto>>, AppError> {
    let file = service.get(user.id, id).await?;
    Ok(Json(ApiResponse::success(Some(file), None)))
}

/// Update file metadata (title, description, tags, category, visibility)
#[utoipa::path(
    put,
    path = "/api/files/{id}",
    tag = "files",
    params(("id" = Uuid, Path, description = "File ID")),
    request_body = UpdateFileDto,
    responses(
        (status = 200, description = "File updated", body = ApiResponse<FileResponseDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateFileDto>,
) -> Result<Json<ApiResponse<FileResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let file = service.update(user.id, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(file),
        Some("File updated successfully".to_string()),
    )))
}

/// Record a view of a file (owner or public)
#[utoipa::path(
    put,
    path = "/api/files/{id}/view",
    tag = "files",
    params(("id" = Uuid, Path, description = "File ID")),
    responses(
        (status = 200, description = "View counted", body = ApiResponse<ViewCountDto>),
        (status = 404, description = "File not found or not accessible")
    ),
    security(("bearer_auth" = []))
)]
pub async fn increment_view(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ViewCountDto>>, AppError> {
    let view_count = service.increment_view(user.id, id).await?;
    Ok(Json(ApiResponse::success(
        Some(ViewCountDto { view_count }),
        None,
    )))
}

/// Delete a file and its stored object
#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    params(("id" = Uuid, Path, description = "File ID")),
    responses(
        (status = 200, description = "File deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_file(
    user: AuthenticatedUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    service.delete(user.id, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("File deleted successfully".to_string()),
    )))
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}
