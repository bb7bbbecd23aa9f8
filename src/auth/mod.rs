pub mod jwt;
pub mod middleware;

/// Cookie holding the marketplace API token for browser sessions.
pub const SESSION_COOKIE: &str = "skillbridge_token";
