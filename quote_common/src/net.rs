//! Shared networking and timing defaults used by the feed and the client.

/// Budget for one whole fetch sequence across all endpoints.
pub const FETCH_TIMEOUT_MS: u64 = 5000;
/// Base period between automatic quote refreshes.
pub const ROTATE_INTERVAL_MS: u64 = 15000;
/// Delay before the next refresh after every endpoint failed.
pub const RETRY_INTERVAL_MS: u64 = 5000;
/// How long a transient notice stays visible.
pub const TOAST_TIMEOUT_MS: u64 = 3500;

/// Origin sent with every quote request.
pub const DEFAULT_ORIGIN: &str = "http://localhost";
/// Accept header value for quote requests.
pub const ACCEPT_JSON: &str = "application/json";
