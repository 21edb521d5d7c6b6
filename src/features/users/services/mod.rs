mod profile_repository;
mod user_profile_service;

pub use profile_repository::{PgProfileRepository, ProfileRepository};
pub use user_profile_service::UserProfileService;
