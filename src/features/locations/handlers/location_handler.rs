use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::locations::dtos::{LocationResponseDto, SuggestLocationsQuery};
use crate::features::locations::services::LocationCatalog;
use crate::shared::types::{ApiResponse, Meta};

/// List all campus locations
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Campus locations", body = ApiResponse<Vec<LocationResponseDto>>),
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(catalog): State<Arc<LocationCatalog>>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let locations: Vec<LocationResponseDto> = catalog.all().iter().map(Into::into).collect();
    let meta = Meta::total(locations.len());
    Ok(Json(ApiResponse::success(Some(locations), None, Some(meta))))
}

/// Autocomplete location names
///
/// Returns every location whose name contains `q`, case-insensitive, in catalog order.
/// An empty query yields an empty list.
#[utoipa::path(
    get,
    path = "/api/locations/suggest",
    params(SuggestLocationsQuery),
    responses(
        (status = 200, description = "Matching locations", body = ApiResponse<Vec<LocationResponseDto>>),
    ),
    tag = "locations"
)]
pub async fn suggest_locations(
    State(catalog): State<Arc<LocationCatalog>>,
    Query(query): Query<SuggestLocationsQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let suggestions: Vec<LocationResponseDto> = catalog
        .suggest(&query.q)
        .into_iter()
        .map(Into::into)
        .collect();
    let meta = Meta::total(suggestions.len());
    Ok(Json(ApiResponse::success(Some(suggestions), None, Some(meta))))
}
