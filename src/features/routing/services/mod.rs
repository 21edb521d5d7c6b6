mod route_planner;

pub use route_planner::{RoutePlanner, RouteQuery};
