use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::routing::dtos::{PlanRouteRequestDto, RouteOptionDto};
use crate::features::routing::services::{RoutePlanner, RouteQuery};
use crate::shared::types::{ApiResponse, Meta};

/// Search route alternatives between two campus locations
///
/// Names are resolved against the campus catalog (exact match first, then substring).
/// Up to three alternatives are returned; the first is the recommended one.
#[utoipa::path(
    post,
    path = "/api/routes",
    request_body = PlanRouteRequestDto,
    responses(
        (status = 200, description = "Route alternatives", body = ApiResponse<Vec<RouteOptionDto>>),
        (status = 400, description = "Unknown start or end location"),
        (status = 502, description = "Directions service failed")
    ),
    tag = "routes"
)]
pub async fn plan_routes(
    State(planner): State<Arc<RoutePlanner>>,
    AppJson(dto): AppJson<PlanRouteRequestDto>,
) -> Result<Json<ApiResponse<Vec<RouteOptionDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let query = RouteQuery::from(dto);
    let options: Vec<RouteOptionDto> = planner
        .plan(&query)
        .await?
        .iter()
        .map(RouteOptionDto::from)
        .collect();

    let meta = Meta::total(options.len());
    Ok(Json(ApiResponse::success(Some(options), None, Some(meta))))
}
