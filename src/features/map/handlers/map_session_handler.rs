use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::map::dtos::{
    CreateMapSessionDto, MapSessionDto, SelectRouteDto, UpdateLocationDto, UpdateSearchTextDto,
};
use crate::features::map::services::MapSessionService;
use crate::shared::types::ApiResponse;

/// Open a map session
///
/// The new map shows every campus marker on the standard base layer, walking mode.
#[utoipa::path(
    post,
    path = "/api/map/sessions",
    request_body = CreateMapSessionDto,
    responses(
        (status = 201, description = "Map session created", body = ApiResponse<MapSessionDto>),
        (status = 400, description = "Invalid viewport size"),
        (status = 429, description = "Too many open sessions")
    ),
    tag = "map"
)]
pub async fn create_map_session(
    State(service): State<Arc<MapSessionService>>,
    AppJson(dto): AppJson<CreateMapSessionDto>,
) -> Result<(StatusCode, Json<ApiResponse<MapSessionDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.create(dto.viewport_size()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(session), None, None)),
    ))
}

/// Get a map session snapshot
#[utoipa::path(
    get,
    path = "/api/map/sessions/{id}",
    params(("id" = Uuid, Path, description = "Map session ID")),
    responses(
        (status = 200, description = "Map session", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn get_map_session(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Close a map session and cancel its pending search
#[utoipa::path(
    delete,
    path = "/api/map/sessions/{id}",
    params(("id" = Uuid, Path, description = "Map session ID")),
    responses(
        (status = 200, description = "Map session closed"),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn delete_map_session(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Map session closed".to_string()),
        None,
    )))
}

/// Set the start search text
///
/// Empty text or "my location" routes from the device position. The route search runs
/// once the inputs have been quiet for the debounce interval.
#[utoipa::path(
    put,
    path = "/api/map/sessions/{id}/start",
    params(("id" = Uuid, Path, description = "Map session ID")),
    request_body = UpdateSearchTextDto,
    responses(
        (status = 200, description = "Start updated", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn set_start(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSearchTextDto>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.set_start(id, dto.text).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Set the end search text
#[utoipa::path(
    put,
    path = "/api/map/sessions/{id}/end",
    params(("id" = Uuid, Path, description = "Map session ID")),
    request_body = UpdateSearchTextDto,
    responses(
        (status = 200, description = "End updated", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn set_end(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSearchTextDto>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.set_end(id, dto.text).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Report a device position fix
#[utoipa::path(
    put,
    path = "/api/map/sessions/{id}/location",
    params(("id" = Uuid, Path, description = "Map session ID")),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "User marker moved", body = ApiResponse<MapSessionDto>),
        (status = 400, description = "Coordinates out of range"),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn update_location(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service
        .update_location(id, [dto.longitude, dto.latitude])
        .await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Switch between walking and wheelchair routing
#[utoipa::path(
    post,
    path = "/api/map/sessions/{id}/route-mode/toggle",
    params(("id" = Uuid, Path, description = "Map session ID")),
    responses(
        (status = 200, description = "Route mode switched", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn toggle_route_mode(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.toggle_route_mode(id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Switch between the standard and satellite base layer
#[utoipa::path(
    post,
    path = "/api/map/sessions/{id}/view-mode/toggle",
    params(("id" = Uuid, Path, description = "Map session ID")),
    responses(
        (status = 200, description = "Base layer switched", body = ApiResponse<MapSessionDto>),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn toggle_view_mode(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.toggle_view_mode(id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Select one of the current route alternatives
#[utoipa::path(
    post,
    path = "/api/map/sessions/{id}/select",
    params(("id" = Uuid, Path, description = "Map session ID")),
    request_body = SelectRouteDto,
    responses(
        (status = 200, description = "Route selected", body = ApiResponse<MapSessionDto>),
        (status = 400, description = "Unknown route id"),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn select_route(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SelectRouteDto>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.select_route(id, dto.route_id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Draw the selected route and fill the turn-by-turn directions
///
/// Previous route lines and start/end markers are replaced, so the map always shows
/// exactly one route after confirmation.
#[utoipa::path(
    post,
    path = "/api/map/sessions/{id}/confirm",
    params(("id" = Uuid, Path, description = "Map session ID")),
    responses(
        (status = 200, description = "Route drawn", body = ApiResponse<MapSessionDto>),
        (status = 400, description = "No route selected or endpoints unresolved"),
        (status = 404, description = "Map session not found")
    ),
    tag = "map"
)]
pub async fn confirm_route(
    State(service): State<Arc<MapSessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MapSessionDto>>> {
    let session = service.confirm(id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MapSessionConfig;
    use crate::features::locations::LocationCatalog;
    use crate::features::map::routes;
    use crate::features::routing::RoutePlanner;
    use crate::shared::test_helpers::{sample_routes, StubRoutingProvider};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn server() -> TestServer {
        let planner = Arc::new(RoutePlanner::new(
            Arc::new(LocationCatalog::bundled().unwrap()),
            Arc::new(StubRoutingProvider::succeeding(sample_routes(3))),
        ));
        let service = Arc::new(MapSessionService::new(
            planner,
            Duration::from_millis(500),
            MapSessionConfig::default(),
        ));
        TestServer::new(routes::routes(service)).unwrap()
    }

    async fn open(server: &TestServer) -> String {
        let response = server.post("/api/map/sessions").json(&json!({})).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_session_places_campus_markers() {
        let server = server();
        let response = server
            .post("/api/map/sessions")
            .json(&json!({"width": 800, "height": 600}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["viewMode"], "standard");
        assert_eq!(data["routeMode"], "walking");
        assert_eq!(data["optionsOpen"], false);
        assert_eq!(data["viewport"]["zoom"], 17.0);
        assert_eq!(data["viewport"]["width"], 800);
        let features = data["features"].as_array().unwrap();
        assert!(!features.is_empty());
        assert!(features.iter().all(|f| f["kind"] == "campus_marker"));
    }

    #[tokio::test]
    async fn test_invalid_viewport_size_rejected() {
        server()
            .post("/api/map/sessions")
            .json(&json!({"width": 10}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_session_not_found() {
        server()
            .get(&format!("/api/map/sessions/{}", Uuid::now_v7()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_location_fix_adds_single_user_marker() {
        let server = server();
        let id = open(&server).await;

        for (lon, lat) in [(-84.5800, 34.0400), (-84.5805, 34.0405)] {
            server
                .put(&format!("/api/map/sessions/{}/location", id))
                .json(&json!({"longitude": lon, "latitude": lat}))
                .await
                .assert_status_ok();
        }

        let body: Value = server
            .get(&format!("/api/map/sessions/{}", id))
            .await
            .json();
        let user_markers = body["data"]["features"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|f| f["kind"] == "user_marker")
            .count();
        assert_eq!(user_markers, 1);
        assert_eq!(
            body["data"]["currentLocation"],
            json!([-84.5805, 34.0405])
        );
    }

    #[tokio::test]
    async fn test_out_of_range_location_rejected() {
        let server = server();
        let id = open(&server).await;

        server
            .put(&format!("/api/map/sessions/{}/location", id))
            .json(&json!({"longitude": 200.0, "latitude": 34.0}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_confirm_without_selection() {
        let server = server();
        let id = open(&server).await;

        let response = server
            .post(&format!("/api/map/sessions/{}/confirm", id))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Please select a route to start.");
    }

    #[tokio::test]
    async fn test_toggles() {
        let server = server();
        let id = open(&server).await;

        let body: Value = server
            .post(&format!("/api/map/sessions/{}/route-mode/toggle", id))
            .await
            .json();
        assert_eq!(body["data"]["routeMode"], "wheelchair");

        let body: Value = server
            .post(&format!("/api/map/sessions/{}/view-mode/toggle", id))
            .await
            .json();
        assert_eq!(body["data"]["viewMode"], "satellite");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let server = server();
        let id = open(&server).await;

        server
            .delete(&format!("/api/map/sessions/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&format!("/api/map/sessions/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
