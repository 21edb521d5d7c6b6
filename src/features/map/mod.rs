//! Interactive campus map sessions.
//!
//! A map session holds what one open map shows: the start/end search boxes, the travel
//! mode, the base layer, the route alternatives with the selected one, and the vector
//! features drawn on top of the tiles (campus markers, the user marker, start/end
//! markers and the route line).
//!
//! Every edit of start, end, travel mode or device position restarts a debounce timer;
//! when it expires the names are resolved and the routing provider is asked for
//! alternatives. A newer edit aborts the pending search, and a generation counter
//! drops the result of a search that finished after being superseded.
//!
//! Sessions not touched for `MAP_SESSION_IDLE_TTL_SECS` are torn down by a background
//! sweeper, and also on `create` when the table is full.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/map/sessions` | Open a session |
//! | GET | `/api/map/sessions/{id}` | Session snapshot |
//! | DELETE | `/api/map/sessions/{id}` | Close a session |
//! | PUT | `/api/map/sessions/{id}/start` | Set start text |
//! | PUT | `/api/map/sessions/{id}/end` | Set end text |
//! | PUT | `/api/map/sessions/{id}/location` | Device position fix |
//! | POST | `/api/map/sessions/{id}/route-mode/toggle` | Walking / wheelchair |
//! | POST | `/api/map/sessions/{id}/view-mode/toggle` | Standard / satellite |
//! | POST | `/api/map/sessions/{id}/select` | Select a route alternative |
//! | POST | `/api/map/sessions/{id}/confirm` | Draw the selected route |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MapSessionService;
