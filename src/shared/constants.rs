/// Longest username accepted by the profile endpoints
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Longest email accepted by the profile endpoints
pub const MAX_PROFILE_EMAIL_LENGTH: usize = 100;

/// Longest email, first name or last name accepted at signup (`VARCHAR(100)` columns)
pub const MAX_ACCOUNT_FIELD_LENGTH: u64 = 100;

/// Shortest password accepted at signup
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Typed start text that means "use the device position"
pub const MY_LOCATION: &str = "my location";

/// Number of alternative routes requested from the directions API
pub const ROUTE_ALTERNATIVES: u32 = 3;

/// Maximum shared fraction between two alternatives before one is discarded
pub const ROUTE_SHARE_FACTOR: f64 = 0.6;
