use crate::features::map::models::projection::{from_lon_lat, Extent, Point};

/// Map resolution (meters per pixel) at zoom 0 for 256px tiles
const RESOLUTION_AT_ZOOM_0: f64 = 156_543.033_928_040_97;

pub const INITIAL_CENTER: [f64; 2] = [-84.5831, 34.0390];
pub const INITIAL_ZOOM: f64 = 17.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Rendered map size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Pixels kept free on every side
    pub padding: f64,
    pub max_zoom: f64,
    pub duration_ms: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: 50.0,
            max_zoom: 18.0,
            duration_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub zoom: f64,
    pub max_zoom: f64,
    pub size: ViewportSize,
    /// Animation length of the last viewport change, for the client to replay
    pub animation_ms: Option<u32>,
}

impl Viewport {
    pub fn initial(size: ViewportSize) -> Self {
        Self {
            center: from_lon_lat(INITIAL_CENTER),
            zoom: INITIAL_ZOOM,
            max_zoom: MAX_ZOOM,
            size,
            animation_ms: None,
        }
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        self.animation_ms = None;
    }

    /// Center on `extent` at the largest zoom that shows all of it inside the padding
    pub fn fit(&mut self, extent: Extent, options: FitOptions) {
        let available_width = (self.size.width as f64 - 2.0 * options.padding).max(1.0);
        let available_height = (self.size.height as f64 - 2.0 * options.padding).max(1.0);

        let resolution =
            (extent.width() / available_width).max(extent.height() / available_height);
        let zoom_cap = options.max_zoom.min(self.max_zoom);

        self.zoom = if resolution > 0.0 {
            (RESOLUTION_AT_ZOOM_0 / resolution).log2().clamp(0.0, zoom_cap)
        } else {
            zoom_cap
        };
        self.center = extent.center();
        self.animation_ms = Some(options.duration_ms);
    }

    /// Meters per pixel at the current zoom
    pub fn resolution(&self) -> f64 {
        RESOLUTION_AT_ZOOM_0 / 2f64.powf(self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_viewport() {
        let viewport = Viewport::initial(ViewportSize::default());
        assert_eq!(viewport.zoom, 17.0);
        assert_eq!(viewport.max_zoom, 19.0);
        assert_eq!(viewport.center, from_lon_lat(INITIAL_CENTER));
    }

    #[test]
    fn test_fit_contains_extent_within_padding() {
        let mut viewport = Viewport::initial(ViewportSize {
            width: 800,
            height: 600,
        });
        let a = from_lon_lat([-84.5900, 34.0350]);
        let b = from_lon_lat([-84.5750, 34.0420]);
        let extent = Extent::from_points(a, b);

        viewport.fit(extent, FitOptions::default());

        assert_eq!(viewport.center, extent.center());
        assert!(viewport.zoom <= 18.0);
        let visible_width = viewport.resolution() * (800.0 - 100.0);
        let visible_height = viewport.resolution() * (600.0 - 100.0);
        assert!(visible_width + 1e-6 >= extent.width());
        assert!(visible_height + 1e-6 >= extent.height());
        assert_eq!(viewport.animation_ms, Some(1000));
    }

    #[test]
    fn test_fit_degenerate_extent_uses_max_zoom() {
        let mut viewport = Viewport::initial(ViewportSize::default());
        let p = from_lon_lat([-84.5831, 34.0390]);

        viewport.fit(Extent::from_points(p, p), FitOptions::default());

        assert_eq!(viewport.zoom, 18.0);
        assert_eq!(viewport.center, p);
    }

    #[test]
    fn test_fit_close_points_capped_at_max_zoom() {
        let mut viewport = Viewport::initial(ViewportSize::default());
        let a = from_lon_lat([-84.58300, 34.03900]);
        let b = from_lon_lat([-84.58301, 34.03901]);

        viewport.fit(Extent::from_points(a, b), FitOptions::default());

        assert_eq!(viewport.zoom, 18.0);
    }
}
