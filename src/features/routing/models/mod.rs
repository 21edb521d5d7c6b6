mod route;

pub use route::{
    RouteEndpoints, RouteOption, RouteStep, StepKind, TravelProfile, TurnByTurnDirection,
};
