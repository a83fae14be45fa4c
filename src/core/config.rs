use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub upload: UploadConfig,
    pub search: SearchConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// HMAC secret used to sign identity tokens
    pub jwt_secret: String,
    /// Token lifetime in days
    pub token_expiry_days: i64,
}

/// Upload limits for the file endpoints.
///
/// Both the size ceiling and the allowed MIME list are configuration-driven,
/// never hardcoded in the services.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes
    pub max_file_size: usize,
    /// Allowed MIME types; entries ending in `/*` match the whole top-level type
    pub allowed_mime_types: Vec<String>,
}

/// Knobs for the in-memory search ranking path.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Upper bound on the candidate set fetched for query-time scoring
    pub max_candidates: i64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for uploaded objects
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for externally reachable links (defaults to endpoint)
    pub public_endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for storing files
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            upload: UploadConfig::from_env()?,
            search: SearchConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 7;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable is required".to_string())?;

        let token_expiry_days = env::var("JWT_EXPIRY_DAYS")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_EXPIRY_DAYS.to_string())
            .parse::<i64>()
            .map_err(|_| "JWT_EXPIRY_DAYS must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            token_expiry_days,
        })
    }
}

impl UploadConfig {
    const DEFAULT_MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100MB
    const DEFAULT_ALLOWED_MIME_TYPES: &'static str =
        "image/*,video/*,audio/*,application/pdf,text/plain,\
         application/msword,application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    pub fn from_env() -> Result<Self, String> {
        let max_file_size = env::var("MAX_FILE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_FILE_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_FILE_SIZE must be a valid number".to_string())?;

        let allowed_mime_types = env::var("ALLOWED_MIME_TYPES")
            .unwrap_or_else(|_| Self::DEFAULT_ALLOWED_MIME_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            max_file_size,
            allowed_mime_types,
        })
    }

    /// Check a MIME type against the configured allowlist.
    ///
    /// Entries like `image/*` match any subtype of that top-level type.
    pub fn is_mime_allowed(&self, content_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|allowed| {
            if let Some(prefix) = allowed.strip_suffix("/*") {
                content_type
                    .split('/')
                    .next()
                    .is_some_and(|top| top.eq_ignore_ascii_case(prefix))
            } else {
                allowed.eq_ignore_ascii_case(content_type)
            }
        })
    }
}

impl SearchConfig {
    const DEFAULT_MAX_CANDIDATES: i64 = 10_000;

    pub fn from_env() -> Result<Self, String> {
        let max_candidates = env::var("SEARCH_MAX_CANDIDATES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CANDIDATES.to_string())
            .parse::<i64>()
            .map_err(|_| "SEARCH_MAX_CANDIDATES must be a valid number".to_string())?;

        Ok(Self { max_candidates })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "MediaVault API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for MediaVault".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "mediavault-uploads".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            bucket,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_config(allowed: &[&str]) -> UploadConfig {
        UploadConfig {
            max_file_size: 1024,
            allowed_mime_types: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn wildcard_mime_entries_match_whole_top_level_type() {
        let config = upload_config(&["image/*", "application/pdf"]);

        assert!(config.is_mime_allowed("image/png"));
        assert!(config.is_mime_allowed("image/webp"));
        assert!(config.is_mime_allowed("application/pdf"));
        assert!(!config.is_mime_allowed("video/mp4"));
        assert!(!config.is_mime_allowed("application/zip"));
    }

    #[test]
    fn exact_mime_entries_ignore_case() {
        let config = upload_config(&["Application/PDF"]);

        assert!(config.is_mime_allowed("application/pdf"));
        assert!(!config.is_mime_allowed("application/pdfx"));
    }
}
