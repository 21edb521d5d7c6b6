use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::routing::models::{RouteOption, TravelProfile, TurnByTurnDirection};
use crate::features::routing::services::RouteQuery;

/// Request DTO for a one-shot route search
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanRouteRequestDto {
    /// Start location name; empty or "my location" uses `currentLocation`
    #[serde(default)]
    pub start: String,

    #[validate(length(min = 1, message = "End location is required"))]
    pub end: String,

    #[serde(default)]
    pub profile: TravelProfile,

    /// Device position as `[longitude, latitude]`
    #[schema(value_type = Option<Vec<f64>>)]
    pub current_location: Option<[f64; 2]>,
}

impl From<PlanRouteRequestDto> for RouteQuery {
    fn from(dto: PlanRouteRequestDto) -> Self {
        RouteQuery {
            start: dto.start,
            end: dto.end,
            device_location: dto.current_location,
            profile: dto.profile,
        }
    }
}

/// One route alternative with display-ready figures
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptionDto {
    pub id: usize,
    pub summary: String,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    /// Distance in kilometers, two decimals
    pub distance_km: f64,
    /// Duration rounded to whole minutes
    pub duration_minutes: i64,
    /// Route geometry as `[longitude, latitude]` pairs
    #[schema(value_type = Vec<Vec<f64>>)]
    pub coordinates: Vec<[f64; 2]>,
    pub directions: Vec<TurnByTurnDirection>,
}

impl From<&RouteOption> for RouteOptionDto {
    fn from(option: &RouteOption) -> Self {
        Self {
            id: option.id,
            summary: option.summary.clone(),
            distance: option.distance,
            duration: option.duration,
            distance_km: (option.distance / 10.0).round() / 100.0,
            duration_minutes: (option.duration / 60.0).round() as i64,
            coordinates: option.coordinates.clone(),
            directions: option.directions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_figures() {
        let option = RouteOption {
            id: 0,
            summary: "Route 1".to_string(),
            distance: 1234.0,
            duration: 929.0,
            coordinates: vec![],
            steps: None,
        };
        let dto = RouteOptionDto::from(&option);
        assert_eq!(dto.distance_km, 1.23);
        assert_eq!(dto.duration_minutes, 15);
    }

    #[test]
    fn test_request_defaults() {
        let dto: PlanRouteRequestDto =
            serde_json::from_str(r#"{"end":"Sturgis Library"}"#).unwrap();
        assert_eq!(dto.start, "");
        assert_eq!(dto.profile, TravelProfile::Walking);
        assert!(dto.current_location.is_none());

        let dto: PlanRouteRequestDto = serde_json::from_str(
            r#"{"start":"Kennesaw Hall","end":"Sturgis Library","profile":"wheelchair","currentLocation":[-84.58,34.04]}"#,
        )
        .unwrap();
        assert_eq!(dto.profile, TravelProfile::Wheelchair);
        assert_eq!(dto.current_location, Some([-84.58, 34.04]));
    }
}
