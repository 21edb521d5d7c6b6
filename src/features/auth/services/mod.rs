mod auth_service;
mod password;
mod user_repository;

pub use auth_service::AuthService;
pub use password::{hash_password, verify_password};
pub use user_repository::{PgUserRepository, UserRepository};
