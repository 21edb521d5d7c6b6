use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::User;
use crate::shared::constants::{MAX_ACCOUNT_FIELD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::shared::validation::EMAIL_REGEX;

/// Request DTO for signup
///
/// Every field is optional at the JSON level so a missing field yields the
/// "All fields are required" message instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequestDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// At least 6 characters
    pub password: Option<String>,
}

/// Signup input once every field is present
#[derive(Debug, Clone, Validate)]
pub struct SignupForm {
    #[validate(
        regex(path = *EMAIL_REGEX, message = "Invalid email format"),
        length(max = MAX_ACCOUNT_FIELD_LENGTH, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(length(
        max = MAX_ACCOUNT_FIELD_LENGTH,
        message = "First name must be at most 100 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        max = MAX_ACCOUNT_FIELD_LENGTH,
        message = "Last name must be at most 100 characters"
    ))]
    pub last_name: String,

    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SignupRequestDto {
    /// Checked before the format rules: any missing or empty field fails the request
    pub fn into_form(self) -> Result<SignupForm> {
        match (
            present(self.email),
            present(self.first_name),
            present(self.last_name),
            present(self.password),
        ) {
            (Some(email), Some(first_name), Some(last_name), Some(password)) => Ok(SignupForm {
                email,
                first_name,
                last_name,
                password,
            }),
            _ => Err(AppError::BadRequest("All fields are required".to_string())),
        }
    }
}

/// Request DTO for login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequestDto {
    pub fn credentials(self) -> Result<(String, String)> {
        match (present(self.email), present(self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            )),
        }
    }
}

/// Account as returned to clients; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub registration_date: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            registration_date: user.registration_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(email: &str, first: &str, last: &str, password: &str) -> SignupRequestDto {
        SignupRequestDto {
            email: Some(email.to_string()),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_missing_or_empty_fields_rejected() {
        let mut missing = dto("ada@campus.edu", "Ada", "Lovelace", "secret1");
        missing.last_name = None;
        let err = missing.into_form().unwrap_err();
        assert_eq!(err.to_string(), "Bad request: All fields are required");

        let empty = dto("ada@campus.edu", "", "Lovelace", "secret1");
        assert!(empty.into_form().is_err());
    }

    #[test]
    fn test_format_rules() {
        let form = |email: &str, password: &str| {
            dto(email, "Ada", "Lovelace", password).into_form().unwrap()
        };
        assert!(form("ada@campus.edu", "secret1").validate().is_ok());
        assert!(form("ada@campus", "secret1").validate().is_err());
        assert!(form("ada@campus.edu", "12345").validate().is_err());
    }

    #[test]
    fn test_names_and_email_bounded_by_column_width() {
        let long = "a".repeat(101);
        let at_limit = "a".repeat(100);

        let form = dto("ada@campus.edu", &at_limit, &at_limit, "secret1")
            .into_form()
            .unwrap();
        assert!(form.validate().is_ok());

        let form = dto("ada@campus.edu", &long, "Lovelace", "secret1")
            .into_form()
            .unwrap();
        assert!(form.validate().is_err());

        let form = dto("ada@campus.edu", "Ada", &long, "secret1")
            .into_form()
            .unwrap();
        assert!(form.validate().is_err());

        let email = format!("{}@campus.edu", "a".repeat(95));
        let form = dto(&email, "Ada", "Lovelace", "secret1").into_form().unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_response_hides_hash() {
        let user = User {
            user_id: 7,
            email: "ada@campus.edu".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            registration_date: Utc::now(),
        };

        let json = serde_json::to_value(UserResponseDto::from(user)).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
