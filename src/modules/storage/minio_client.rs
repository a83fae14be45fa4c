//! MinIO/S3-compatible storage client
//!
//! Stores uploaded media bytes under keys prefixed by resource type
//! (`image/...`, `video/...`, `raw/...`). The prefix is recorded on the
//! metadata record at upload time, so deletes normally address the exact
//! key; prefix guessing only happens for records with an unknown type.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::core::config::MinIOConfig;
use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Storage-level resource type, used as the object key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Video,
    Raw,
}

impl ResourceType {
    /// All resource types, in the order tried when the recorded type is unknown.
    pub const DELETE_GUESS_ORDER: [ResourceType; 3] =
        [ResourceType::Image, ResourceType::Video, ResourceType::Raw];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
        }
    }

    /// Parse a stored resource type string; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(ResourceType::Image),
            "video" => Some(ResourceType::Video),
            "raw" => Some(ResourceType::Raw),
            _ => None,
        }
    }

    /// Derive the storage resource type from a MIME type.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            ResourceType::Image
        } else if mime_type.starts_with("video/") {
            ResourceType::Video
        } else {
            ResourceType::Raw
        }
    }
}

/// Result of a delete attempt against the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The object existed and was removed
    Deleted,
    /// No object was stored under the key
    NotFound,
}

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    /// Access key for AWS Signature v4 signing
    access_key: String,
    /// Secret key for AWS Signature v4 signing
    secret_key: String,
    /// Region name for AWS Signature v4 signing
    region_name: String,
    /// HTTP client for bucket policy operations
    http_client: Client,
}

impl MinIOClient {
    /// Create a new MinIO client from configuration
    ///
    /// This will:
    /// 1. Create the bucket if it doesn't exist
    /// 2. Set a public read policy on the bucket
    pub async fn new(config: MinIOConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        // Create HTTP client for bucket policy operations
        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        // Ensure bucket exists and set up policies
        client.ensure_bucket_exists().await?;
        client.set_public_read_policy().await?;

        info!(
            "MinIO client initialized for endpoint: {}, bucket: {}",
            client.endpoint,
            client.bucket.name()
        );

        Ok(client)
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Try to create bucket - if it already exists, MinIO will return an error
        // which we can safely ignore
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                // Bucket already exists - this is fine
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    /// Create the bucket
    async fn create_bucket(&self) -> Result<(), AppError> {
        let bucket_config = BucketConfiguration::default();

        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Set a public read policy on the bucket so uploaded objects are
    /// directly addressable; visibility of individual files is enforced by
    /// the metadata layer, not at the storage layer.
    async fn set_public_read_policy(&self) -> Result<(), AppError> {
        let bucket_name = self.bucket.name();

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/*")]
                }
            ]
        });

        let policy_str = policy.to_string();

        // Use AWS Signature v4 to sign the request
        match self
            .put_bucket_policy_with_sigv4(&bucket_name, &policy_str)
            .await
        {
            Ok(_) => {
                info!("Set public read policy for {}/*", bucket_name);
                Ok(())
            }
            Err(e) => {
                // Log warning but don't fail startup - policy can be set manually
                warn!(
                    "Failed to set bucket policy for '{}': {}. \
                    You may need to set the policy manually using: \
                    mc anonymous set download minio/{}",
                    bucket_name, e, bucket_name
                );
                Ok(())
            }
        }
    }

    /// Put bucket policy using AWS Signature v4
    async fn put_bucket_policy_with_sigv4(
        &self,
        bucket_name: &str,
        policy: &str,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        // Parse endpoint to get host
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let port = endpoint_url.port();
        let host_header = match port {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        // Build the URL for PUT bucket policy
        let url = format!("{}/{}?policy", self.endpoint, bucket_name);

        // Calculate payload hash
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

        // Create canonical request
        let canonical_uri = format!("/{}", bucket_name);
        let canonical_querystring = "policy=";
        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host_header, payload_hash, amz_date
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";

        let canonical_request = format!(
            "PUT\n{}\n{}\n{}\n{}\n{}",
            canonical_uri, canonical_querystring, canonical_headers, signed_headers, payload_hash
        );

        // Create string to sign
        let algorithm = "AWS4-HMAC-SHA256";
        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region_name);
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            algorithm, amz_date, credential_scope, canonical_request_hash
        );

        // Calculate signature
        let signature = self.calculate_signature(&date_stamp, &string_to_sign)?;

        // Create authorization header
        let authorization_header = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        );

        // Make the request
        let response = self
            .http_client
            .put(&url)
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization_header)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Internal(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }

    /// Calculate AWS Signature v4 signature
    fn calculate_signature(
        &self,
        date_stamp: &str,
        string_to_sign: &str,
    ) -> Result<String, AppError> {
        // Step 1: Create signing key
        let k_date = Self::hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = Self::hmac_sha256(&k_date, self.region_name.as_bytes())?;
        let k_service = Self::hmac_sha256(&k_region, b"s3")?;
        let k_signing = Self::hmac_sha256(&k_service, b"aws4_request")?;

        // Step 2: Calculate signature
        let signature = Self::hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }

    /// HMAC-SHA256 helper
    fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Build the object key for a new upload.
    ///
    /// Layout: `{resource_type}/{owner_id}/{file_id}.{extension}`. The type
    /// prefix is what makes delete-by-guess possible for legacy records.
    pub fn object_key(
        resource_type: ResourceType,
        owner_id: &str,
        file_id: &str,
        extension: &str,
    ) -> String {
        format!(
            "{}/{}/{}.{}",
            resource_type.as_str(),
            owner_id,
            file_id,
            extension
        )
    }

    /// Swap the resource-type prefix of an existing key.
    pub fn rekey(key: &str, resource_type: ResourceType) -> String {
        match key.split_once('/') {
            Some((_, rest)) => format!("{}/{}", resource_type.as_str(), rest),
            None => format!("{}/{}", resource_type.as_str(), key),
        }
    }

    /// Upload a file to the storage
    ///
    /// # Arguments
    /// * `key` - The object key (path) in the bucket
    /// * `data` - The file content as bytes
    /// * `content_type` - The MIME type of the file
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to upload file '{}': {}", key, e))
            })?;

        debug!("Uploaded file '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    /// Remove an object from storage, distinguishing a missing object from
    /// a failed delete.
    ///
    /// S3 deletes succeed for absent keys, so existence is checked first;
    /// callers rely on `NotFound` to accept already-gone objects during
    /// resource-type fallback.
    pub async fn remove(&self, key: &str) -> Result<DeleteOutcome, AppError> {
        if !self.exists(key).await? {
            debug!("Object '{}' not found in bucket '{}'", key, self.bucket.name());
            return Ok(DeleteOutcome::NotFound);
        }

        self.bucket.delete_object(key).await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to delete file '{}': {}", key, e))
        })?;

        debug!(
            "Deleted file '{}' from bucket '{}'",
            key,
            self.bucket.name()
        );
        Ok(DeleteOutcome::Deleted)
    }

    /// Check if a file exists in the storage
    pub async fn exists(&self, key: &str) -> Result<bool, AppError> {
        match self.bucket.head_object(key).await {
            Ok(_) => Ok(true),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::ExternalServiceError(format!(
                        "Failed to check if file '{}' exists: {}",
                        key, e
                    )))
                }
            }
        }
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Direct URL for an object via the internal endpoint.
    pub fn file_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket.name(), key)
    }

    /// Direct URL for an object via the public endpoint.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_layout_includes_type_prefix() {
        let key = MinIOClient::object_key(ResourceType::Image, "owner-1", "file-1", "png");
        assert_eq!(key, "image/owner-1/file-1.png");
    }

    #[test]
    fn rekey_swaps_only_the_prefix() {
        let key = "image/owner-1/file-1.png";
        assert_eq!(
            MinIOClient::rekey(key, ResourceType::Video),
            "video/owner-1/file-1.png"
        );
        assert_eq!(
            MinIOClient::rekey(key, ResourceType::Raw),
            "raw/owner-1/file-1.png"
        );
    }

    #[test]
    fn resource_type_derived_from_mime_prefix() {
        assert_eq!(ResourceType::from_mime("image/png"), ResourceType::Image);
        assert_eq!(ResourceType::from_mime("video/mp4"), ResourceType::Video);
        assert_eq!(ResourceType::from_mime("audio/mpeg"), ResourceType::Raw);
        assert_eq!(ResourceType::from_mime("application/pdf"), ResourceType::Raw);
    }

    #[test]
    fn unknown_resource_type_strings_do_not_parse() {
        assert_eq!(ResourceType::parse("image"), Some(ResourceType::Image));
        assert_eq!(ResourceType::parse("auto"), None);
        assert_eq!(ResourceType::parse(""), None);
    }
}
