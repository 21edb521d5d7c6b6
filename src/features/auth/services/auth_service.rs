use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{SignupForm, UserResponseDto};
use crate::features::auth::models::NewUser;
use crate::features::auth::services::password::{hash_password, verify_password};
use crate::features::auth::services::user_repository::{UserRepository, DUPLICATE_EMAIL_MESSAGE};

/// Service for account operations (signup, login)
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create an account. The email pre-check and the unique constraint both map to
    /// `Conflict`, so concurrent signups for one email still insert a single row.
    pub async fn signup(&self, form: SignupForm) -> Result<UserResponseDto> {
        if self.users.find_by_email(&form.email).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
        }

        let password_hash = hash_password(form.password).await?;

        let user = self
            .users
            .create(NewUser {
                email: form.email,
                first_name: form.first_name,
                last_name: form.last_name,
                password_hash,
            })
            .await?;

        tracing::info!("User created: user_id={}", user.user_id);

        Ok(user.into())
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: String) -> Result<UserResponseDto> {
        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::info!("Failed login for user_id={}", user.user_id);
            return Err(invalid());
        }

        Ok(user.into())
    }
}
