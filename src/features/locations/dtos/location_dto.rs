use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::locations::models::Location;

/// Campus location as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub name: String,
    /// `[longitude, latitude]`
    #[schema(value_type = Vec<f64>)]
    pub coordinates: [f64; 2],
}

impl From<&Location> for LocationResponseDto {
    fn from(loc: &Location) -> Self {
        Self {
            name: loc.name.clone(),
            coordinates: loc.coordinates,
        }
    }
}

/// Query params for autocomplete
#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestLocationsQuery {
    /// Partial location name (case-insensitive)
    #[serde(default)]
    pub q: String,
}
