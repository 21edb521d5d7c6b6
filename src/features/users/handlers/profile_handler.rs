use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{SaveProfileRequestDto, UserProfileResponseDto};
use crate::features::users::services::UserProfileService;
use crate::shared::types::ApiResponse;

/// Get a user's accessibility profile
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username, at most 50 characters")),
    responses(
        (status = 200, description = "Profile found", body = ApiResponse<UserProfileResponseDto>),
        (status = 400, description = "Invalid username"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_profile(
    State(service): State<Arc<UserProfileService>>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    let profile = service.get_profile(&username).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Create or update a profile
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = SaveProfileRequestDto,
    responses(
        (status = 200, description = "User profile saved", body = ApiResponse<UserProfileResponseDto>),
        (status = 400, description = "Invalid input or input exceeds maximum length")
    ),
    tag = "users"
)]
pub async fn save_profile(
    State(service): State<Arc<UserProfileService>>,
    AppJson(dto): AppJson<SaveProfileRequestDto>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    let profile = service.save_profile(dto.into_new_profile()?).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("User profile saved".to_string()),
        None,
    )))
}

/// Create or update the profile named in the path
///
/// The path username replaces any username in the body.
#[utoipa::path(
    post,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username, at most 50 characters")),
    request_body = SaveProfileRequestDto,
    responses(
        (status = 200, description = "User profile saved", body = ApiResponse<UserProfileResponseDto>),
        (status = 400, description = "Invalid input or input exceeds maximum length")
    ),
    tag = "users"
)]
pub async fn save_profile_for_username(
    State(service): State<Arc<UserProfileService>>,
    Path(username): Path<String>,
    AppJson(mut dto): AppJson<SaveProfileRequestDto>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    dto.username = Some(username);
    let profile = service.save_profile(dto.into_new_profile()?).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("User profile saved".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::routes;
    use crate::shared::test_helpers::InMemoryProfileRepository;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::Fake;
    use serde_json::{json, Value};

    fn server() -> (TestServer, Arc<InMemoryProfileRepository>) {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let service = Arc::new(UserProfileService::new(repo.clone()));
        (TestServer::new(routes::routes(service)).unwrap(), repo)
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let (server, _) = server();
        let username: String = Username().fake();
        let email: String = SafeEmail().fake();

        let response = server
            .post("/api/users")
            .json(&json!({"username": username, "email": email, "highContrastMode": true}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "User profile saved");

        let response = server.get(&format!("/api/users/{}", username)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["email"], email.as_str());
        assert_eq!(body["data"]["highContrastMode"], true);
    }

    #[tokio::test]
    async fn test_save_by_path_upserts() {
        let (server, repo) = server();

        for mode in [false, true] {
            server
                .post("/api/users/owl")
                .json(&json!({"email": "owl@campus.edu", "highContrastMode": mode}))
                .await
                .assert_status_ok();
        }

        assert_eq!(repo.len(), 1);
        let body: Value = server.get("/api/users/owl").await.json();
        assert_eq!(body["data"]["highContrastMode"], true);
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let (server, repo) = server();

        let response = server
            .post("/api/users")
            .json(&json!({"username": "owl", "email": "owl@campus.edu", "highContrastMode": "yes"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid input");

        let response = server
            .post("/api/users")
            .json(&json!({"username": "o".repeat(51), "email": "owl@campus.edu", "highContrastMode": false}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Input exceeds maximum length");

        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_get_errors() {
        let (server, _) = server();

        let response = server.get(&format!("/api/users/{}", "o".repeat(51))).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid username");

        let response = server.get("/api/users/nobody").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["message"], "User not found");
    }
}
