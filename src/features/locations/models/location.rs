use serde::Deserialize;

/// `[longitude, latitude]` in WGS84 degrees
pub type LonLat = [f64; 2];

/// A named point on campus
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: LonLat,
}
