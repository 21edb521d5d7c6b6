use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationCatalog;

/// Create routes for the locations feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(catalog: Arc<LocationCatalog>) -> Router {
    Router::new()
        .route("/api/locations", get(handlers::list_locations))
        .route("/api/locations/suggest", get(handlers::suggest_locations))
        .with_state(catalog)
}
