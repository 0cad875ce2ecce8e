//! Error types for the shipment-search crate.
//!
//! All errors use stable string messages suitable for display to operators
//! and programmatic handling. Store credentials never appear in error
//! messages.

/// Errors that can occur during search and export operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid search request (empty term list, field not valid for the
    /// chosen direction). Rejected before any background work starts.
    #[error("request error: {0}")]
    Request(String),

    /// An HTTP request to the tracking API failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(String),

    /// CSV export failed; includes the target path and underlying cause.
    #[error("export error: {0}")]
    Export(String),

    /// Event channel closed unexpectedly.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for shipment-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
