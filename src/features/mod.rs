pub mod auth;
pub mod locations;
pub mod map;
pub mod routing;
pub mod users;
