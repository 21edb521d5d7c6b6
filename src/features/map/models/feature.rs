use crate::features::map::models::projection::Point;
use crate::features::routing::TravelProfile;

/// Line style of a drawn route
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: &'static str,
    pub width: f64,
    pub line_dash: Option<[u32; 2]>,
}

impl StrokeStyle {
    /// Wheelchair routes are dashed so they stay distinguishable without color
    pub fn for_profile(profile: TravelProfile) -> Self {
        match profile {
            TravelProfile::Walking => Self {
                color: "#2563eb",
                width: 4.0,
                line_dash: None,
            },
            TravelProfile::Wheelchair => Self {
                color: "#4287f5",
                width: 4.0,
                line_dash: Some([5, 5]),
            },
        }
    }
}

/// Everything drawn on the vector layer above the base tiles
#[derive(Debug, Clone, PartialEq)]
pub enum MapFeature {
    CampusMarker { name: String, position: Point },
    UserMarker { position: Point },
    StartMarker { position: Point },
    EndMarker { position: Point },
    RouteLine {
        route_id: usize,
        path: Vec<Point>,
        style: StrokeStyle,
    },
}

impl MapFeature {
    /// Features replaced on every route confirmation
    pub fn is_route_annotation(&self) -> bool {
        matches!(
            self,
            MapFeature::RouteLine { .. } | MapFeature::StartMarker { .. } | MapFeature::EndMarker { .. }
        )
    }
}
