//! Accessibility profiles.
//!
//! One row per username in `user_profiles` holding the email and the high contrast
//! preference. Saving is an upsert keyed by username.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/{username}` | Get a profile |
//! | POST | `/api/users/{username}` | Save the profile named in the path |
//! | POST | `/api/users` | Save a profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{PgProfileRepository, UserProfileService};
