use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::locations::LonLat;

/// How the user travels; selects the directions API profile and the route line style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TravelProfile {
    #[default]
    Walking,
    Wheelchair,
}

impl TravelProfile {
    /// Profile name understood by OpenRouteService
    pub fn ors_profile(&self) -> &'static str {
        match self {
            TravelProfile::Walking => "foot-walking",
            TravelProfile::Wheelchair => "wheelchair",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TravelProfile::Walking => TravelProfile::Wheelchair,
            TravelProfile::Wheelchair => TravelProfile::Walking,
        }
    }
}

/// Maneuver kind of a route step (OpenRouteService instruction types 0-13)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Left,
    Right,
    SharpLeft,
    SharpRight,
    SlightLeft,
    SlightRight,
    Straight,
    EnterRoundabout,
    ExitRoundabout,
    UTurn,
    Goal,
    Depart,
    KeepLeft,
    KeepRight,
    Unknown,
}

impl From<u8> for StepKind {
    fn from(code: u8) -> Self {
        match code {
            0 => StepKind::Left,
            1 => StepKind::Right,
            2 => StepKind::SharpLeft,
            3 => StepKind::SharpRight,
            4 => StepKind::SlightLeft,
            5 => StepKind::SlightRight,
            6 => StepKind::Straight,
            7 => StepKind::EnterRoundabout,
            8 => StepKind::ExitRoundabout,
            9 => StepKind::UTurn,
            10 => StepKind::Goal,
            11 => StepKind::Depart,
            12 => StepKind::KeepLeft,
            13 => StepKind::KeepRight,
            _ => StepKind::Unknown,
        }
    }
}

/// One maneuver of a route as returned by the directions API
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub kind: StepKind,
    pub instruction: String,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    pub name: Option<String>,
}

/// One alternative path between the two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOption {
    pub id: usize,
    pub summary: String,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    pub coordinates: Vec<LonLat>,
    pub steps: Option<Vec<RouteStep>>,
}

impl RouteOption {
    /// Turn-by-turn list for display; empty when the API returned no steps
    pub fn directions(&self) -> Vec<TurnByTurnDirection> {
        self.steps
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|step| TurnByTurnDirection {
                kind: step.kind,
                instruction: step.instruction.clone(),
                distance: step.distance,
                duration: step.duration,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TurnByTurnDirection {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub instruction: String,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
}

/// Resolved start and end of a route request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEndpoints {
    pub start: LonLat,
    pub end: LonLat,
}
