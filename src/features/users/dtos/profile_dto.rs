use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUserProfile, UserProfile};
use crate::shared::constants::{MAX_PROFILE_EMAIL_LENGTH, MAX_USERNAME_LENGTH};

/// Request DTO for creating or updating a profile
///
/// `highContrastMode` is kept as raw JSON so a non-boolean value is reported as
/// invalid input rather than a parse error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequestDto {
    pub username: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub high_contrast_mode: Option<serde_json::Value>,
}

impl SaveProfileRequestDto {
    pub fn into_new_profile(self) -> Result<NewUserProfile> {
        let invalid = || AppError::BadRequest("Invalid input".to_string());

        let username = self.username.filter(|u| !u.is_empty()).ok_or_else(invalid)?;
        let email = self.email.filter(|e| !e.is_empty()).ok_or_else(invalid)?;
        let high_contrast_mode = self
            .high_contrast_mode
            .and_then(|v| v.as_bool())
            .ok_or_else(invalid)?;

        if username.chars().count() > MAX_USERNAME_LENGTH
            || email.chars().count() > MAX_PROFILE_EMAIL_LENGTH
        {
            return Err(AppError::BadRequest(
                "Input exceeds maximum length".to_string(),
            ));
        }

        Ok(NewUserProfile {
            username,
            email,
            high_contrast_mode,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponseDto {
    pub username: String,
    pub email: String,
    pub high_contrast_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileResponseDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
            high_contrast_mode: profile.high_contrast_mode,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<NewUserProfile> {
        serde_json::from_str::<SaveProfileRequestDto>(json)
            .unwrap()
            .into_new_profile()
    }

    #[test]
    fn test_valid_input() {
        let profile =
            parse(r#"{"username":"owl","email":"owl@campus.edu","highContrastMode":true}"#)
                .unwrap();
        assert_eq!(profile.username, "owl");
        assert!(profile.high_contrast_mode);
    }

    #[test]
    fn test_high_contrast_must_be_boolean() {
        for body in [
            r#"{"username":"owl","email":"owl@campus.edu"}"#,
            r#"{"username":"owl","email":"owl@campus.edu","highContrastMode":"true"}"#,
            r#"{"username":"owl","email":"owl@campus.edu","highContrastMode":1}"#,
        ] {
            let err = parse(body).unwrap_err();
            assert_eq!(err.to_string(), "Bad request: Invalid input");
        }
    }

    #[test]
    fn test_length_limits() {
        let long_name = "u".repeat(51);
        let body = format!(
            r#"{{"username":"{}","email":"owl@campus.edu","highContrastMode":false}}"#,
            long_name
        );
        let err = parse(&body).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Input exceeds maximum length");

        let long_email = format!("{}@campus.edu", "e".repeat(90));
        let body = format!(
            r#"{{"username":"owl","email":"{}","highContrastMode":false}}"#,
            long_email
        );
        assert!(parse(&body).is_err());

        let exact = "u".repeat(50);
        let body = format!(
            r#"{{"username":"{}","email":"owl@campus.edu","highContrastMode":false}}"#,
            exact
        );
        assert!(parse(&body).is_ok());
    }
}
