use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::UserProfileResponseDto;
use crate::features::users::models::NewUserProfile;
use crate::features::users::services::ProfileRepository;
use crate::shared::constants::MAX_USERNAME_LENGTH;

/// Service for reading and saving accessibility profiles
pub struct UserProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl UserProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn get_profile(&self, username: &str) -> Result<UserProfileResponseDto> {
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AppError::BadRequest("Invalid username".to_string()));
        }

        self.profiles
            .find_by_username(username)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn save_profile(&self, profile: NewUserProfile) -> Result<UserProfileResponseDto> {
        let saved = self.profiles.upsert(profile).await?;

        tracing::info!(
            "Profile saved: username={}, high_contrast_mode={}",
            saved.username,
            saved.high_contrast_mode
        );

        Ok(saved.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryProfileRepository;

    fn profile(username: &str, email: &str, high_contrast_mode: bool) -> NewUserProfile {
        NewUserProfile {
            username: username.to_string(),
            email: email.to_string(),
            high_contrast_mode,
        }
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_latest() {
        let repo = Arc::new(InMemoryProfileRepository::default());
        let service = UserProfileService::new(repo.clone());

        service
            .save_profile(profile("owl", "owl@campus.edu", false))
            .await
            .unwrap();
        service
            .save_profile(profile("owl", "night.owl@campus.edu", true))
            .await
            .unwrap();

        assert_eq!(repo.len(), 1);
        let stored = service.get_profile("owl").await.unwrap();
        assert_eq!(stored.email, "night.owl@campus.edu");
        assert!(stored.high_contrast_mode);
    }

    #[tokio::test]
    async fn test_get_profile_errors() {
        let service = UserProfileService::new(Arc::new(InMemoryProfileRepository::default()));

        let err = service.get_profile(&"x".repeat(51)).await.unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Invalid username");

        let err = service.get_profile("ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: User not found");
    }
}
