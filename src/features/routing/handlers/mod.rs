pub mod route_handler;

pub use route_handler::{__path_plan_routes, plan_routes};
