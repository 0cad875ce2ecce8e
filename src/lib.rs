//! # shipment-search
//!
//! Batch search against a remote shipment-tracking REST API: submit a list
//! of lookup terms and collect a unified, exportable table of results.
//!
//! ## Design
//!
//! - One background task per search run; terms processed strictly in order
//! - Live progress events over an ordered, non-blocking channel
//! - Cooperative cancellation, honored at term boundaries
//! - Every term yields at least one record — unsatisfied terms become
//!   synthetic error records, never silent drops
//! - Heterogeneous nested JSON payloads flatten into a column-stable table
//!   (`Store` first, remaining columns lexicographic) for display or CSV
//!   export
//!
//! ## Usage
//!
//! ```no_run
//! # async fn example() -> shipment_search::Result<()> {
//! use shipment_search::{
//!     Direction, SearchConfig, SearchEvent, SearchField, SearchRequest, SearchSession, Store,
//! };
//!
//! let request = SearchRequest {
//!     store: Store {
//!         id: "7b0fb2ac".into(),
//!         name: "Diesel".into(),
//!         username: "api-user".into(),
//!         password: "api-pass".into(),
//!     },
//!     direction: Direction::Outbound,
//!     field: SearchField::ClientId,
//!     terms: shipment_search::parse_terms("A1, A2\nA3"),
//! };
//!
//! let mut session = SearchSession::start(request, SearchConfig::default())?;
//! while let Some(event) = session.events().recv().await {
//!     match event {
//!         SearchEvent::Log { level, message } => println!("[{level}] {message}"),
//!         SearchEvent::Done { records } => {
//!             let table = shipment_search::project(&shipment_search::flatten_batch(&records));
//!             println!("{} columns, {} rows", table.columns.len(), table.rows.len());
//!             break;
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod export;
pub mod flatten;
pub mod http;
pub mod orchestrator;
pub mod table;
pub mod types;

pub use channel::{channel, EventReceiver, EventSender};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use export::{export_csv, ExportOutcome};
pub use flatten::{flatten_batch, flatten_record, FlatRecord};
pub use orchestrator::SearchSession;
pub use table::{project, ResultTable, TableRow};
pub use types::{
    parse_terms, Direction, LogLevel, ResultRecord, SearchEvent, SearchField, SearchRequest, Store,
};

use tokio_util::sync::CancellationToken;

/// Run a search to completion on the current task and return the terminal
/// record batch, discarding progress events.
///
/// Convenience wrapper for callers that do not need live progress; the
/// event-driven surface is [`SearchSession`].
///
/// # Errors
///
/// Returns [`SearchError::Config`] or [`SearchError::Request`] for caller
/// misuse, and [`SearchError::Http`] if the HTTP client cannot be built.
/// Per-term lookup failures do not error; they appear in the batch as
/// synthetic records.
pub async fn collect_results(
    request: &SearchRequest,
    config: &SearchConfig,
) -> Result<Vec<ResultRecord>> {
    config.validate()?;
    request.validate()?;
    let client = http::build_client(config)?;

    let (tx, mut rx) = channel::channel();
    let cancel = CancellationToken::new();
    orchestrator::run_search(request, config, &client, &tx, &cancel).await;
    drop(tx);

    while let Some(event) = rx.recv().await {
        if let SearchEvent::Done { records } = event {
            return Ok(records);
        }
    }
    Err(SearchError::Channel(
        "search ended without a terminal event".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(terms: Vec<&str>) -> SearchRequest {
        SearchRequest {
            store: Store {
                id: "id".into(),
                name: "Diesel".into(),
                username: "user".into(),
                password: "pass".into(),
            },
            direction: Direction::Outbound,
            field: SearchField::ClientId,
            terms: terms.into_iter().map(str::to_owned).collect(),
        }
    }

    #[tokio::test]
    async fn collect_results_rejects_empty_terms() {
        let result = collect_results(&make_request(vec![]), &SearchConfig::default()).await;
        assert!(matches!(result, Err(SearchError::Request(_))));
    }

    #[tokio::test]
    async fn collect_results_rejects_invalid_config() {
        let config = SearchConfig {
            search_timeout_seconds: 0,
            ..Default::default()
        };
        let result = collect_results(&make_request(vec!["A1"]), &config).await;
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[tokio::test]
    async fn collect_results_rejects_field_direction_mismatch() {
        let mut request = make_request(vec!["A1"]);
        request.direction = Direction::Inbound;
        request.field = SearchField::ChannelId;
        let result = collect_results(&request, &SearchConfig::default()).await;
        assert!(matches!(result, Err(SearchError::Request(_))));
    }
}
