mod ors_client;
mod routing_provider;

pub use ors_client::OrsClient;
pub use routing_provider::RoutingProvider;
