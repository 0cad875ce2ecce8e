//! Search configuration with defaults matching the production tracking API.
//!
//! [`SearchConfig`] controls the API endpoint, per-call timeouts, and the
//! windowed-search shape. Use [`Default::default()`] unless pointing the
//! engine at a test server.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Configuration for a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the tracking API, without a trailing slash.
    pub base_url: String,
    /// Timeout in seconds for direct point lookups.
    pub point_timeout_seconds: u64,
    /// Timeout in seconds for windowed searches.
    pub search_timeout_seconds: u64,
    /// Length of the trailing search window in days.
    pub window_days: i64,
    /// Page size requested from the windowed search endpoint.
    pub page_size: u32,
    /// Custom User-Agent string. If `None`, a crate-identifying default is used.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://storeapi.parcelninja.com/api/v1".into(),
            point_timeout_seconds: 20,
            search_timeout_seconds: 30,
            window_days: 730,
            page_size: 100,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be non-empty
    /// - both timeouts must be greater than 0
    /// - `window_days` must be greater than 0
    /// - `page_size` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.base_url.trim().is_empty() {
            return Err(SearchError::Config("base_url must not be empty".into()));
        }
        if self.point_timeout_seconds == 0 || self.search_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeouts must be greater than 0".into(),
            ));
        }
        if self.window_days <= 0 {
            return Err(SearchError::Config(
                "window_days must be greater than 0".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(SearchError::Config(
                "page_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
