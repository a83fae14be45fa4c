use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{
    delete_file, file_stats, get_file, increment_view, list_files, search_files, update_file,
    upload_file,
};
use crate::features::files::services::{FileService, SearchService};

/// Shared state for the files feature.
#[derive(Clone, FromRef)]
pub struct FilesState {
    pub files: Arc<FileService>,
    pub search: Arc<SearchService>,
}

/// Create routes for the files feature
///
/// Route order matters: `/api/files/search` and `/api/files/stats` must be
/// registered alongside `/api/files/{id}` as literal segments, which axum
/// matches before the parameter.
pub fn routes(state: FilesState, max_file_size: usize) -> Router {
    Router::new()
        .route(
            "/api/files/upload",
            // Allow body size up to the configured limit + buffer for multipart overhead
            post(upload_file).layer(DefaultBodyLimit::max(max_file_size + 1024 * 1024)),
        )
        .route("/api/files", get(list_files))
        .route("/api/files/search", get(search_files))
        .route("/api/files/stats", get(file_stats))
        .route(
            "/api/files/{id}",
            get(get_file).put(update_file).delete(delete_file),
        )
        .route("/api/files/{id}/view", put(increment_view))
        .with_state(state)
}
