use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUserProfile, UserProfile};

/// Storage of accessibility profiles, one row per username
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>>;

    /// Insert, or overwrite email and high contrast mode of the existing row
    async fn upsert(&self, profile: NewUserProfile) -> Result<UserProfile>;
}

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, username, email, high_contrast_mode, created_at, updated_at
            FROM user_profiles
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get profile by username: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn upsert(&self, profile: NewUserProfile) -> Result<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (username, email, high_contrast_mode)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO UPDATE
            SET email = EXCLUDED.email,
                high_contrast_mode = EXCLUDED.high_contrast_mode,
                updated_at = NOW()
            RETURNING id, username, email, high_contrast_mode, created_at, updated_at
            "#,
        )
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(profile.high_contrast_mode)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save profile: {:?}", e);
            AppError::Database(e)
        })
    }
}
