pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::{routes, FilesState};
pub use services::{FileService, SearchService};
