use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a signed-up account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub registration_date: DateTime<Utc>,
}

/// Row to insert at signup; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}
