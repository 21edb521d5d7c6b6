//! Accessible route planning.
//!
//! Wraps the OpenRouteService directions API: two coordinates and a travel profile in,
//! up to three alternative routes with geometry, distance, duration and turn-by-turn
//! steps out. The map sessions use the same planner for their debounced searches.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/routes` | Resolve start/end names and fetch route alternatives |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use clients::{OrsClient, RoutingProvider};
pub use models::{RouteEndpoints, RouteOption, StepKind, TravelProfile, TurnByTurnDirection};
pub use services::{RoutePlanner, RouteQuery};
