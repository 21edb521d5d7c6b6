use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::map::models::{BaseLayer, MapFeature, Viewport, ViewportSize};
use crate::features::map::services::MapSession;
use crate::features::routing::dtos::RouteOptionDto;
use crate::features::routing::{TravelProfile, TurnByTurnDirection};

/// Request DTO for opening a map session
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMapSessionDto {
    /// Rendered map width in pixels
    #[validate(range(min = 100, max = 8192))]
    pub width: Option<u32>,

    /// Rendered map height in pixels
    #[validate(range(min = 100, max = 8192))]
    pub height: Option<u32>,
}

impl CreateMapSessionDto {
    pub fn viewport_size(&self) -> ViewportSize {
        let default = ViewportSize::default();
        ViewportSize {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
        }
    }
}

/// New contents of the start or end search box
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSearchTextDto {
    #[validate(length(max = 200, message = "Search text is too long"))]
    pub text: String,
}

/// Device position fix
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationDto {
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectRouteDto {
    pub route_id: usize,
}

/// Vector feature drawn on the map, in EPSG:3857 meters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapFeatureDto {
    CampusMarker {
        name: String,
        #[schema(value_type = Vec<f64>)]
        position: [f64; 2],
    },
    UserMarker {
        #[schema(value_type = Vec<f64>)]
        position: [f64; 2],
    },
    StartMarker {
        #[schema(value_type = Vec<f64>)]
        position: [f64; 2],
    },
    EndMarker {
        #[schema(value_type = Vec<f64>)]
        position: [f64; 2],
    },
    RouteLine {
        #[serde(rename = "routeId")]
        route_id: usize,
        #[schema(value_type = Vec<Vec<f64>>)]
        path: Vec<[f64; 2]>,
        color: String,
        width: f64,
        #[serde(rename = "lineDash")]
        #[schema(value_type = Option<Vec<u32>>)]
        line_dash: Option<[u32; 2]>,
    },
}

impl From<&MapFeature> for MapFeatureDto {
    fn from(feature: &MapFeature) -> Self {
        match feature {
            MapFeature::CampusMarker { name, position } => MapFeatureDto::CampusMarker {
                name: name.clone(),
                position: *position,
            },
            MapFeature::UserMarker { position } => MapFeatureDto::UserMarker {
                position: *position,
            },
            MapFeature::StartMarker { position } => MapFeatureDto::StartMarker {
                position: *position,
            },
            MapFeature::EndMarker { position } => MapFeatureDto::EndMarker {
                position: *position,
            },
            MapFeature::RouteLine {
                route_id,
                path,
                style,
            } => MapFeatureDto::RouteLine {
                route_id: *route_id,
                path: path.clone(),
                color: style.color.to_string(),
                width: style.width,
                line_dash: style.line_dash,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewportDto {
    /// Projected center (EPSG:3857)
    #[schema(value_type = Vec<f64>)]
    pub center: [f64; 2],
    pub zoom: f64,
    pub max_zoom: f64,
    pub width: u32,
    pub height: u32,
    /// Set when the last change should be animated
    pub animation_ms: Option<u32>,
}

impl From<&Viewport> for ViewportDto {
    fn from(viewport: &Viewport) -> Self {
        Self {
            center: viewport.center,
            zoom: viewport.zoom,
            max_zoom: viewport.max_zoom,
            width: viewport.size.width,
            height: viewport.size.height,
            animation_ms: viewport.animation_ms,
        }
    }
}

/// Snapshot of a map session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapSessionDto {
    pub id: Uuid,
    pub view_mode: BaseLayer,
    pub route_mode: TravelProfile,
    pub start: String,
    pub end: String,
    /// Last device fix as `[longitude, latitude]`
    #[schema(value_type = Option<Vec<f64>>)]
    pub current_location: Option<[f64; 2]>,
    pub route_options: Vec<RouteOptionDto>,
    pub selected_route_id: Option<usize>,
    pub options_open: bool,
    pub directions: Vec<TurnByTurnDirection>,
    pub features: Vec<MapFeatureDto>,
    pub viewport: ViewportDto,
}

impl From<&MapSession> for MapSessionDto {
    fn from(session: &MapSession) -> Self {
        let query = session.query();
        let view = session.view();

        Self {
            id: session.id(),
            view_mode: view.base_layer(),
            route_mode: query.profile,
            start: query.start.clone(),
            end: query.end.clone(),
            current_location: query.device_location,
            route_options: session
                .route_options()
                .iter()
                .map(RouteOptionDto::from)
                .collect(),
            selected_route_id: session.selected_route_id(),
            options_open: session.options_open(),
            directions: session.directions().to_vec(),
            features: view.features().iter().map(MapFeatureDto::from).collect(),
            viewport: ViewportDto::from(view.viewport()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::map::models::StrokeStyle;

    #[test]
    fn test_route_line_serializes_style() {
        let feature = MapFeature::RouteLine {
            route_id: 1,
            path: vec![[0.0, 0.0], [10.0, 10.0]],
            style: StrokeStyle::for_profile(TravelProfile::Wheelchair),
        };

        let json = serde_json::to_value(MapFeatureDto::from(&feature)).unwrap();
        assert_eq!(json["kind"], "route_line");
        assert_eq!(json["routeId"], 1);
        assert_eq!(json["color"], "#4287f5");
        assert_eq!(json["lineDash"], serde_json::json!([5, 5]));
    }

    #[test]
    fn test_viewport_size_defaults() {
        let size = CreateMapSessionDto {
            width: Some(400),
            height: None,
        }
        .viewport_size();
        assert_eq!(size.width, 400);
        assert_eq!(size.height, 768);
    }
}
