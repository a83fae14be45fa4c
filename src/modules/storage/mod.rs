//! Storage module for uploaded media objects
//!
//! Provides a MinIO/S3-compatible client used by the file lifecycle
//! manager to persist and remove object bytes.

mod minio_client;
mod object_store;

pub use minio_client::{DeleteOutcome, MinIOClient, ResourceType};
pub use object_store::ObjectStore;
