use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto, UpdateProfileDto, UserResponseDto,
};
use crate::features::auth::models::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.register(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Account created successfully".to_string()),
        )),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;

    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login successful".to_string()),
    )))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>, AppError> {
    let profile = service.get_profile(user.id).await?;

    Ok(Json(ApiResponse::success(Some(profile), None)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "auth",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_profile(user.id, dto).await?;

    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated successfully".to_string()),
    )))
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = "auth",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Current password incorrect"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.change_password(user.id, dto).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Password changed successfully".to_string()),
    )))
}
