mod feature;
mod map_view;
mod projection;
mod viewport;

pub use feature::{MapFeature, StrokeStyle};
pub use map_view::{BaseLayer, MapView};
pub use projection::{from_lon_lat, Extent, Point};
pub use viewport::{FitOptions, Viewport, ViewportSize};
