use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::map::handlers;
use crate::features::map::services::MapSessionService;

pub fn routes(service: Arc<MapSessionService>) -> Router {
    Router::new()
        .route("/api/map/sessions", post(handlers::create_map_session))
        .route(
            "/api/map/sessions/{id}",
            get(handlers::get_map_session).delete(handlers::delete_map_session),
        )
        .route("/api/map/sessions/{id}/start", put(handlers::set_start))
        .route("/api/map/sessions/{id}/end", put(handlers::set_end))
        .route(
            "/api/map/sessions/{id}/location",
            put(handlers::update_location),
        )
        .route(
            "/api/map/sessions/{id}/route-mode/toggle",
            post(handlers::toggle_route_mode),
        )
        .route(
            "/api/map/sessions/{id}/view-mode/toggle",
            post(handlers::toggle_view_mode),
        )
        .route("/api/map/sessions/{id}/select", post(handlers::select_route))
        .route("/api/map/sessions/{id}/confirm", post(handlers::confirm_route))
        .with_state(service)
}
