use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::{LonLat, Location};
use crate::shared::constants::MY_LOCATION;

const BUNDLED_LOCATIONS: &str = include_str!("../../../../data/campus_locations.json");

#[derive(Debug, Deserialize)]
struct LocationFile {
    locations: Vec<Location>,
}

/// Immutable list of campus locations with name lookup
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    /// Load the catalog shipped in `data/campus_locations.json`
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_LOCATIONS)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LocationFile = serde_json::from_str(raw)
            .map_err(|e| AppError::Internal(format!("Invalid campus location data: {}", e)))?;

        if let Some(bad) = file.locations.iter().find(|l| !is_valid_lon_lat(l.coordinates)) {
            return Err(AppError::Internal(format!(
                "Campus location '{}' has out-of-range coordinates {:?}",
                bad.name, bad.coordinates
            )));
        }

        Ok(Self::new(file.locations))
    }

    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Resolve free text to a single location.
    ///
    /// Case-insensitive exact name match wins; otherwise the first location whose name
    /// contains the query. Empty text and "my location" never resolve.
    pub fn resolve(&self, query: &str) -> Option<&Location> {
        if query.is_empty() || query.to_lowercase() == MY_LOCATION {
            return None;
        }

        let needle = query.to_lowercase();

        self.locations
            .iter()
            .find(|loc| loc.name.to_lowercase() == needle)
            .or_else(|| {
                self.locations
                    .iter()
                    .find(|loc| loc.name.to_lowercase().contains(&needle))
            })
    }

    pub fn resolve_coordinates(&self, query: &str) -> Option<LonLat> {
        self.resolve(query).map(|loc| loc.coordinates)
    }

    /// Every location whose name contains the query (case-insensitive), in catalog order
    pub fn suggest(&self, query: &str) -> Vec<&Location> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.locations
            .iter()
            .filter(|loc| loc.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn is_valid_lon_lat([lon, lat]: LonLat) -> bool {
    (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LocationCatalog {
        LocationCatalog::bundled().expect("bundled catalog should parse")
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = catalog();
        assert!(catalog.len() >= 10);
    }

    #[test]
    fn test_kennesaw_hall_matches_exactly_one_entry() {
        let catalog = catalog();

        let suggestions = catalog.suggest("Kennesaw Hall");
        let names: Vec<&str> = suggestions.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Kennesaw Hall"]);

        let resolved = catalog.resolve("kennesaw hall").unwrap();
        assert_eq!(resolved.name, "Kennesaw Hall");
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_match() {
        // "Convocation Center Parking" precedes "Convocation Center" in the catalog
        let catalog = catalog();
        let resolved = catalog.resolve("CONVOCATION CENTER").unwrap();
        assert_eq!(resolved.name, "Convocation Center");
    }

    #[test]
    fn test_substring_match_returns_first_in_catalog_order() {
        let catalog = catalog();
        let resolved = catalog.resolve("library").unwrap();
        assert_eq!(resolved.name, "Sturgis Library");

        let resolved = catalog.resolve("science").unwrap();
        assert_eq!(resolved.name, "Social Sciences Building");
    }

    #[test]
    fn test_unmatched_and_special_queries_resolve_to_none() {
        let catalog = catalog();
        assert!(catalog.resolve("Hogwarts").is_none());
        assert!(catalog.resolve("").is_none());
        assert!(catalog.resolve("My Location").is_none());
        assert!(catalog.suggest("Hogwarts").is_empty());
        assert!(catalog.suggest("").is_empty());
    }

    #[test]
    fn test_suggest_is_case_insensitive_and_ordered() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .suggest("PARKING")
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Convocation Center Parking",
                "Central Parking Deck",
                "East Parking Deck"
            ]
        );
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let raw = r#"{"locations":[{"name":"Nowhere","coordinates":[34.0, -184.5]}]}"#;
        assert!(LocationCatalog::from_json(raw).is_err());
    }
}
