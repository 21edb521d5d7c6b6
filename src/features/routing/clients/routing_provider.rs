use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::routing::models::{RouteEndpoints, RouteOption, TravelProfile};

/// Source of route alternatives between two coordinates
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Fetch up to three alternatives; the first one is the provider's recommendation
    async fn alternatives(
        &self,
        endpoints: RouteEndpoints,
        profile: TravelProfile,
    ) -> Result<Vec<RouteOption>>;
}
