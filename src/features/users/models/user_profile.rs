use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for stored accessibility preferences
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub high_contrast_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub username: String,
    pub email: String,
    pub high_contrast_mode: bool,
}
