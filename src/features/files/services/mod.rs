mod file_service;
pub mod keywords;
pub mod relevance;
mod search_service;

pub use file_service::{FileService, UploadRequest};
pub use search_service::{QueryPlan, SearchService};
