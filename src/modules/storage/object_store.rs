use std::future::Future;

use crate::core::error::AppError;
use crate::modules::storage::minio_client::{DeleteOutcome, MinIOClient};

/// Object storage operations used by the file lifecycle manager.
///
/// `MinIOClient` is the production implementation; fakes stand in for it in
/// tests to exercise failure ordering without a reachable store.
pub trait ObjectStore: Send + Sync {
    fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<DeleteOutcome, AppError>> + Send;

    fn file_url(&self, key: &str) -> String;

    fn public_url(&self, key: &str) -> String;
}

impl ObjectStore for MinIOClient {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        MinIOClient::upload(self, key, data, content_type).await
    }

    async fn remove(&self, key: &str) -> Result<DeleteOutcome, AppError> {
        MinIOClient::remove(self, key).await
    }

    fn file_url(&self, key: &str) -> String {
        MinIOClient::file_url(self, key)
    }

    fn public_url(&self, key: &str) -> String {
        MinIOClient::public_url(self, key)
    }
}
