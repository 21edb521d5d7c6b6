use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::routing::handlers;
use crate::features::routing::services::RoutePlanner;

pub fn routes(planner: Arc<RoutePlanner>) -> Router {
    Router::new()
        .route("/api/routes", post(handlers::plan_routes))
        .with_state(planner)
}
