use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, SignupRequestDto, UserResponseDto};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Create an account
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Missing field, invalid email or short password"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignupRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    let form = dto.into_form()?;
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.signup(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("User created successfully".to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let (email, password) = dto.credentials()?;

    let user = service.login(&email, password).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("Login successful".to_string()),
        None,
    )))
}
