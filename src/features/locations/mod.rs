//! Static campus location catalog.
//!
//! Named points of interest are bundled with the binary and never change at runtime.
//! The catalog backs the start/end search boxes of the map: free text is resolved to
//! coordinates and partially typed names produce autocomplete suggestions.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/locations` | List every campus location |
//! | GET | `/api/locations/suggest?q=` | Autocomplete suggestions for a partial name |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{LonLat, Location};
pub use services::LocationCatalog;
