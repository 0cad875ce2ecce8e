//! Shared HTTP client for tracking API requests.
//!
//! Provides a configured [`reqwest::Client`] with a JSON `Accept` header.
//! Timeouts are applied per request (point lookups and windowed searches
//! have different budgets), so the client itself carries none.

use crate::config::SearchConfig;
use crate::error::SearchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

/// Default User-Agent when the config does not override it.
const DEFAULT_USER_AGENT: &str = concat!("shipment-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the tracking API.
///
/// The client has:
/// - `Accept: application/json` on every request
/// - User-Agent from config, or the crate default
/// - No client-level timeout (callers set one per request)
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
