use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::locations::{LocationCatalog, LonLat};
use crate::features::map::models::feature::{MapFeature, StrokeStyle};
use crate::features::map::models::projection::{from_lon_lat, Extent};
use crate::features::map::models::viewport::{FitOptions, Viewport, ViewportSize};
use crate::features::routing::{RouteOption, TravelProfile};

/// Base tile layer shown under the features
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BaseLayer {
    #[default]
    Standard,
    Satellite,
}

impl BaseLayer {
    pub fn toggled(self) -> Self {
        match self {
            BaseLayer::Standard => BaseLayer::Satellite,
            BaseLayer::Satellite => BaseLayer::Standard,
        }
    }
}

/// Viewport, base layer and vector features of one map
#[derive(Debug, Clone)]
pub struct MapView {
    base_layer: BaseLayer,
    viewport: Viewport,
    features: Vec<MapFeature>,
}

impl MapView {
    /// Fresh map at the campus center with a marker on every catalog location
    pub fn new(catalog: &LocationCatalog, size: ViewportSize) -> Self {
        let features = catalog
            .all()
            .iter()
            .map(|loc| MapFeature::CampusMarker {
                name: loc.name.clone(),
                position: from_lon_lat(loc.coordinates),
            })
            .collect();

        Self {
            base_layer: BaseLayer::Standard,
            viewport: Viewport::initial(size),
            features,
        }
    }

    pub fn base_layer(&self) -> BaseLayer {
        self.base_layer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }

    pub fn toggle_base_layer(&mut self) -> BaseLayer {
        self.base_layer = self.base_layer.toggled();
        self.base_layer
    }

    /// Move the user marker (added on the first fix) and follow it
    pub fn set_user_position(&mut self, lon_lat: LonLat) {
        let position = from_lon_lat(lon_lat);

        let existing = self.features.iter_mut().find_map(|f| match f {
            MapFeature::UserMarker { position } => Some(position),
            _ => None,
        });

        match existing {
            Some(marker) => *marker = position,
            None => self.features.push(MapFeature::UserMarker { position }),
        }

        self.viewport.set_center(position);
    }

    /// Remove route lines and start/end markers
    pub fn clear_routes(&mut self) {
        self.features.retain(|f| !f.is_route_annotation());
    }

    /// Draw start/end markers, fit the viewport to them and draw the route line
    pub fn annotate_route(
        &mut self,
        start: LonLat,
        end: LonLat,
        route: &RouteOption,
        profile: TravelProfile,
    ) {
        let start_point = from_lon_lat(start);
        let end_point = from_lon_lat(end);

        self.features.push(MapFeature::StartMarker {
            position: start_point,
        });
        self.features.push(MapFeature::EndMarker {
            position: end_point,
        });

        self.viewport.fit(
            Extent::from_points(start_point, end_point),
            FitOptions::default(),
        );

        self.features.push(MapFeature::RouteLine {
            route_id: route.id,
            path: route.coordinates.iter().copied().map(from_lon_lat).collect(),
            style: StrokeStyle::for_profile(profile),
        });
    }

    pub fn route_line_count(&self) -> usize {
        self.features
            .iter()
            .filter(|f| matches!(f, MapFeature::RouteLine { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_routes;

    fn view() -> MapView {
        MapView::new(
            &LocationCatalog::bundled().unwrap(),
            ViewportSize::default(),
        )
    }

    fn count<F: Fn(&MapFeature) -> bool>(view: &MapView, pred: F) -> usize {
        view.features().iter().filter(|f| pred(f)).count()
    }

    #[test]
    fn test_new_view_places_campus_markers() {
        let catalog = LocationCatalog::bundled().unwrap();
        let view = view();
        assert_eq!(
            count(&view, |f| matches!(f, MapFeature::CampusMarker { .. })),
            catalog.len()
        );
        assert_eq!(view.base_layer(), BaseLayer::Standard);
    }

    #[test]
    fn test_toggle_base_layer() {
        let mut view = view();
        assert_eq!(view.toggle_base_layer(), BaseLayer::Satellite);
        assert_eq!(view.toggle_base_layer(), BaseLayer::Standard);
    }

    #[test]
    fn test_user_marker_added_once_and_followed() {
        let mut view = view();
        view.set_user_position([-84.5800, 34.0400]);
        view.set_user_position([-84.5810, 34.0410]);

        assert_eq!(count(&view, |f| matches!(f, MapFeature::UserMarker { .. })), 1);
        assert_eq!(view.viewport().center, from_lon_lat([-84.5810, 34.0410]));
    }

    #[test]
    fn test_annotate_then_clear_keeps_campus_and_user_markers() {
        let mut view = view();
        let before = view.features().len();
        view.set_user_position([-84.5800, 34.0400]);

        let route = &sample_routes(1)[0];
        view.annotate_route(
            [-84.58205, 34.03865],
            [-84.5835, 34.038],
            route,
            TravelProfile::Wheelchair,
        );

        assert_eq!(view.route_line_count(), 1);
        assert_eq!(count(&view, |f| matches!(f, MapFeature::StartMarker { .. })), 1);
        assert_eq!(count(&view, |f| matches!(f, MapFeature::EndMarker { .. })), 1);
        let dashed = view.features().iter().any(|f| {
            matches!(f, MapFeature::RouteLine { style, .. } if style.line_dash == Some([5, 5]))
        });
        assert!(dashed);
        assert_eq!(view.viewport().animation_ms, Some(1000));

        view.clear_routes();

        assert_eq!(view.route_line_count(), 0);
        assert_eq!(view.features().len(), before + 1);
    }
}
