use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::RoutingConfig;
use crate::core::error::{AppError, Result};
use crate::features::locations::LonLat;
use crate::features::routing::clients::RoutingProvider;
use crate::features::routing::models::{
    RouteEndpoints, RouteOption, RouteStep, StepKind, TravelProfile,
};
use crate::shared::constants::{ROUTE_ALTERNATIVES, ROUTE_SHARE_FACTOR};

/// Request body for `POST /v2/directions/{profile}/geojson`
#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: [LonLat; 2],
    alternative_routes: AlternativeRoutes,
    instructions: bool,
}

#[derive(Debug, Serialize)]
struct AlternativeRoutes {
    target_count: u32,
    share_factor: f64,
}

/// GeoJSON FeatureCollection returned by the directions endpoint
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    pub properties: RouteProperties,
    pub geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    pub summary: RouteSummary,
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
}

/// Zero distance/duration fields are omitted by the API
#[derive(Debug, Default, Deserialize)]
pub struct RouteSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteSegment {
    #[serde(default)]
    pub steps: Vec<SegmentStep>,
}

#[derive(Debug, Deserialize)]
pub struct SegmentStep {
    #[serde(rename = "type")]
    pub kind: u8,
    pub instruction: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<LonLat>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { code: Option<i64>, message: String },
    Plain(String),
}

impl DirectionsResponse {
    /// Convert features into numbered route options.
    ///
    /// Steps come from the first segment only; a two-point request has exactly one.
    pub fn into_route_options(self) -> Vec<RouteOption> {
        self.features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| {
                let steps = feature
                    .properties
                    .segments
                    .into_iter()
                    .next()
                    .map(|segment| {
                        segment
                            .steps
                            .into_iter()
                            .map(|step| RouteStep {
                                kind: StepKind::from(step.kind),
                                instruction: step.instruction,
                                distance: step.distance,
                                duration: step.duration,
                                name: step.name.filter(|n| n != "-"),
                            })
                            .collect()
                    });

                RouteOption {
                    id: index,
                    summary: format!("Route {}", index + 1),
                    distance: feature.properties.summary.distance,
                    duration: feature.properties.summary.duration,
                    coordinates: feature.geometry.coordinates,
                    steps,
                }
            })
            .collect()
    }
}

/// OpenRouteService directions client
pub struct OrsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OrsClient {
    pub fn new(config: &RoutingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("CampusAccessMap/0.1 (accessible-routing)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn directions_url(&self, profile: TravelProfile) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.base_url,
            profile.ors_profile()
        )
    }
}

#[async_trait]
impl RoutingProvider for OrsClient {
    async fn alternatives(
        &self,
        endpoints: RouteEndpoints,
        profile: TravelProfile,
    ) -> Result<Vec<RouteOption>> {
        let url = self.directions_url(profile);
        let body = DirectionsRequest {
            coordinates: [endpoints.start, endpoints.end],
            alternative_routes: AlternativeRoutes {
                target_count: ROUTE_ALTERNATIVES,
                share_factor: ROUTE_SHARE_FACTOR,
            },
            instructions: true,
        };

        tracing::debug!(
            "Requesting directions: profile={} start={:?} end={:?}",
            profile.ors_profile(),
            endpoints.start,
            endpoints.end
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Directions request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Directions service unavailable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = describe_error(&raw);
            tracing::warn!("Directions API returned {}: {}", status, message);
            return Err(AppError::ExternalServiceError(format!(
                "Directions service returned {}: {}",
                status, message
            )));
        }

        let parsed: DirectionsResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse directions response: {:?}", e);
            AppError::ExternalServiceError(format!("Invalid directions response: {}", e))
        })?;

        let options = parsed.into_route_options();
        tracing::debug!("Directions API returned {} alternatives", options.len());
        Ok(options)
    }
}

/// Extract a readable message from an API error body
fn describe_error(raw: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(raw) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Detailed { code, message },
        }) => match code {
            Some(code) => format!("{} (code {})", message, code),
            None => message,
        },
        Ok(ErrorEnvelope {
            error: ErrorBody::Plain(message),
        }) => message,
        Err(_) if raw.is_empty() => "empty response body".to_string(),
        Err(_) => raw.chars().take(200).collect(),
    }
}
