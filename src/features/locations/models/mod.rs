mod location;

pub use location::{LonLat, Location};
