use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::locations::{LocationCatalog, LonLat};
use crate::features::routing::clients::RoutingProvider;
use crate::features::routing::models::{RouteEndpoints, RouteOption, TravelProfile};
use crate::shared::constants::MY_LOCATION;

/// Free-text route request as typed into the search boxes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteQuery {
    pub start: String,
    pub end: String,
    pub device_location: Option<LonLat>,
    pub profile: TravelProfile,
}

impl RouteQuery {
    /// A search is only attempted once there is an end and some start (text or device fix)
    pub fn is_ready(&self) -> bool {
        (!self.start.is_empty() || self.device_location.is_some()) && !self.end.is_empty()
    }

    /// Empty start text or "my location" means the device position is the start
    pub fn uses_device_start(&self) -> bool {
        self.start.is_empty() || self.start.to_lowercase() == MY_LOCATION
    }
}

/// Resolves typed names to coordinates and asks the routing provider for alternatives
pub struct RoutePlanner {
    catalog: Arc<LocationCatalog>,
    provider: Arc<dyn RoutingProvider>,
}

impl RoutePlanner {
    pub fn new(catalog: Arc<LocationCatalog>, provider: Arc<dyn RoutingProvider>) -> Self {
        Self { catalog, provider }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn resolve_start(&self, query: &RouteQuery) -> Option<LonLat> {
        if query.uses_device_start() {
            query.device_location
        } else {
            self.catalog.resolve_coordinates(&query.start)
        }
    }

    pub fn resolve_end(&self, query: &RouteQuery) -> Option<LonLat> {
        self.catalog.resolve_coordinates(&query.end)
    }

    /// Both endpoints, or `None` when either side does not resolve
    pub fn resolve(&self, query: &RouteQuery) -> Option<RouteEndpoints> {
        Some(RouteEndpoints {
            start: self.resolve_start(query)?,
            end: self.resolve_end(query)?,
        })
    }

    pub async fn alternatives(
        &self,
        endpoints: RouteEndpoints,
        profile: TravelProfile,
    ) -> Result<Vec<RouteOption>> {
        self.provider.alternatives(endpoints, profile).await
    }

    /// Resolve and fetch in one step; unresolved names are a client error and no
    /// request reaches the provider
    pub async fn plan(&self, query: &RouteQuery) -> Result<Vec<RouteOption>> {
        let start = self.resolve_start(query).ok_or_else(|| {
            if query.uses_device_start() {
                AppError::BadRequest(
                    "Unable to determine your current location. Please enter a start location."
                        .to_string(),
                )
            } else {
                AppError::BadRequest(format!("Unknown start location '{}'", query.start))
            }
        })?;

        let end = self
            .resolve_end(query)
            .ok_or_else(|| AppError::BadRequest("Please enter a valid end location".to_string()))?;

        let options = self
            .alternatives(RouteEndpoints { start, end }, query.profile)
            .await?;

        tracing::info!(
            "Planned {} route alternatives ({}): '{}' -> '{}'",
            options.len(),
            query.profile.ors_profile(),
            query.start,
            query.end
        );

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_routes, StubRoutingProvider};

    fn planner(provider: Arc<StubRoutingProvider>) -> RoutePlanner {
        RoutePlanner::new(Arc::new(LocationCatalog::bundled().unwrap()), provider)
    }

    fn query(start: &str, end: &str) -> RouteQuery {
        RouteQuery {
            start: start.to_string(),
            end: end.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_readiness() {
        assert!(!query("", "").is_ready());
        assert!(!query("Kennesaw Hall", "").is_ready());
        assert!(!query("", "Sturgis Library").is_ready());
        assert!(query("Kennesaw Hall", "Sturgis Library").is_ready());

        let with_device = RouteQuery {
            device_location: Some([-84.58, 34.04]),
            ..query("", "Sturgis Library")
        };
        assert!(with_device.is_ready());
    }

    #[test]
    fn test_my_location_uses_device_fix() {
        let planner = planner(Arc::new(StubRoutingProvider::succeeding(sample_routes(1))));
        let device = [-84.5801, 34.0411];

        let typed = RouteQuery {
            device_location: Some(device),
            ..query("My Location", "library")
        };
        let endpoints = planner.resolve(&typed).unwrap();
        assert_eq!(endpoints.start, device);

        let without_fix = query("my location", "library");
        assert!(planner.resolve(&without_fix).is_none());
    }

    #[tokio::test]
    async fn test_plan_calls_provider_with_resolved_coordinates() {
        let provider = Arc::new(StubRoutingProvider::succeeding(sample_routes(3)));
        let planner = planner(Arc::clone(&provider));

        let mut q = query("Kennesaw Hall", "Sturgis Library");
        q.profile = TravelProfile::Wheelchair;
        let options = planner.plan(&q).await.unwrap();

        assert_eq!(options.len(), 3);
        assert_eq!(provider.calls(), 1);
        let (endpoints, profile) = provider.last_request().unwrap();
        assert_eq!(endpoints.start, [-84.58205, 34.03865]);
        assert_eq!(endpoints.end, [-84.5835, 34.038]);
        assert_eq!(profile, TravelProfile::Wheelchair);
    }

    #[tokio::test]
    async fn test_unmatched_name_suppresses_request() {
        let provider = Arc::new(StubRoutingProvider::succeeding(sample_routes(3)));
        let planner = planner(Arc::clone(&provider));

        let err = planner
            .plan(&query("Kennesaw Hall", "Hogwarts"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = planner
            .plan(&query("Hogwarts", "Kennesaw Hall"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = Arc::new(StubRoutingProvider::failing());
        let planner = planner(Arc::clone(&provider));

        let err = planner
            .plan(&query("Kennesaw Hall", "Sturgis Library"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
