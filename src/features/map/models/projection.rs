use std::f64::consts::PI;

use crate::features::locations::LonLat;

/// Projected Web Mercator (EPSG:3857) coordinate in meters
pub type Point = [f64; 2];

const EARTH_RADIUS: f64 = 6_378_137.0;
const HALF_SIZE: f64 = PI * EARTH_RADIUS;

/// Project WGS84 longitude/latitude to Web Mercator
pub fn from_lon_lat([lon, lat]: LonLat) -> Point {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    [x, y.clamp(-HALF_SIZE, HALF_SIZE)]
}

/// Axis-aligned bounding box in projected coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min_x: a[0].min(b[0]),
            min_y: a[1].min(b[1]),
            max_x: a[0].max(b[0]),
            max_y: a[1].max(b[1]),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_origin_and_antimeridian() {
        let origin = from_lon_lat([0.0, 0.0]);
        assert!(approx(origin[0], 0.0));
        assert!(approx(origin[1], 0.0));

        let east = from_lon_lat([180.0, 0.0]);
        assert!(approx(east[0], 20_037_508.342789244));
    }

    #[test]
    fn test_campus_center_projection() {
        // Reference values from EPSG:3857 for (-84.5831, 34.0390)
        let p = from_lon_lat([-84.5831, 34.0390]);
        assert!((p[0] - -9_415_747.62).abs() < 0.1);
        assert!((p[1] - 4_034_039.98).abs() < 0.1);
    }

    #[test]
    fn test_extent_from_points_is_order_independent() {
        let a = [10.0, -5.0];
        let b = [-2.0, 7.0];
        let extent = Extent::from_points(a, b);
        assert_eq!(extent, Extent::from_points(b, a));
        assert_eq!(extent.width(), 12.0);
        assert_eq!(extent.height(), 12.0);
        assert_eq!(extent.center(), [4.0, 1.0]);
    }
}
