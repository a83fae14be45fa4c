use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::shared::types::{ApiResponse, PageInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::get_profile,
        auth_handlers::update_profile,
        auth_handlers::change_password,
        // Files
        files_handlers::upload_file,
        files_handlers::list_files,
        files_handlers::search_files,
        files_handlers::file_stats,
        files_handlers::get_file,
        files_handlers::update_file,
        files_handlers::increment_view,
        files_handlers::delete_file,
    ),
    components(
        schemas(
            // Shared
            PageInfo,
            // Auth
            auth_dtos::RegisterDto,
            auth_dtos::LoginDto,
            auth_dtos::UpdateProfileDto,
            auth_dtos::ChangePasswordDto,
            auth_dtos::UserResponseDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_dtos::UserResponseDto>,
            // Files
            files_dtos::FileType,
            files_dtos::FileCategory,
            files_dtos::SortBy,
            files_dtos::SortOrder,
            files_dtos::UploadFileDto,
            files_dtos::UpdateFileDto,
            files_dtos::FileMetadataDto,
            files_dtos::FileResponseDto,
            files_dtos::FileListResponseDto,
            files_dtos::ViewCountDto,
            files_dtos::FileStatsEntryDto,
            files_dtos::FileStatsDto,
            ApiResponse<files_dtos::FileResponseDto>,
            ApiResponse<files_dtos::FileListResponseDto>,
            ApiResponse<files_dtos::ViewCountDto>,
            ApiResponse<files_dtos::FileStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login, and profile management"),
        (name = "files", description = "File upload, metadata, search, and stats")
    ),
    modifiers(&SecurityAddon),
    info(
        title = "MediaVault API",
        version = "0.1.0",
        description = "API documentation for MediaVault",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
