//! Account signup and login.
//!
//! Accounts live in the `users` table with an Argon2 password hash. Login only checks
//! credentials and returns the account; no session token is issued.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/signup` | Create an account |
//! | POST | `/api/login` | Check email and password |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AuthService, PgUserRepository};
