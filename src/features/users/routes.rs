use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserProfileService;

pub fn routes(service: Arc<UserProfileService>) -> Router {
    Router::new()
        .route("/api/users", post(handlers::save_profile))
        .route(
            "/api/users/{username}",
            get(handlers::get_profile).post(handlers::save_profile_for_username),
        )
        .with_state(service)
}
