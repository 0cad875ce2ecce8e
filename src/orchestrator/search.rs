//! The sequential search run loop.
//!
//! One invocation processes its terms strictly in order — no parallelism
//! within a run, so remote-call rate is bounded by design. Each term ends in
//! at least one record: payload records on success, a synthetic error record
//! otherwise. The loop emits progress events throughout and always finishes
//! with exactly one terminal `Done` event, cancellation included.

use super::lookup::{self, LookupOutcome};
use crate::channel::EventSender;
use crate::config::SearchConfig;
use crate::types::{Direction, LogLevel, ResultRecord, SearchField, SearchRequest};
use tokio_util::sync::CancellationToken;

/// Execute one validated search request, publishing events to `events`.
///
/// Cancellation is cooperative and checked only at term boundaries; an
/// in-flight remote call is never interrupted, so stopping after a cancel
/// request is bounded by that call's timeout. Infallible by construction:
/// every failure mode becomes an event plus a synthetic record.
pub async fn run_search(
    request: &SearchRequest,
    config: &SearchConfig,
    client: &reqwest::Client,
    events: &EventSender,
    cancel: &CancellationToken,
) {
    let store = &request.store;
    let total = request.terms.len();
    let mut records: Vec<ResultRecord> = Vec::new();

    events.log(
        LogLevel::Info,
        format!("Starting search in store '{}' ({})", store.name, store.id),
    );
    events.log(
        LogLevel::Info,
        format!(
            "Type: {}, Field: {}, Terms: {total}",
            request.direction, request.field
        ),
    );

    for (index, term) in request.terms.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::debug!(term, "cancellation requested; stopping at term boundary");
            events.log(LogLevel::Warn, "Search stopped by user.");
            break;
        }

        events.log(
            LogLevel::Info,
            format!("Searching ({}/{total}): {term}...", index + 1),
        );

        let direct = request.direction == Direction::Outbound
            && request.field == SearchField::ClientId;
        let outcome = if direct {
            events.log(
                LogLevel::Debug,
                format!(
                    "GET {} [X-Client-Id: {term}]",
                    lookup::point_lookup_url(&config.base_url)
                ),
            );
            lookup::point_lookup(client, config, store, term).await
        } else {
            events.log(
                LogLevel::Debug,
                format!(
                    "GET {} ?search={term}",
                    lookup::search_url(&config.base_url, request.direction)
                ),
            );
            lookup::windowed_search(client, config, store, request.direction, request.field, term)
                .await
        };

        match outcome {
            LookupOutcome::Found(items) => {
                tracing::debug!(term, count = items.len(), "term satisfied");
                records.extend(
                    items
                        .into_iter()
                        .map(|fields| ResultRecord::from_payload(&store.name, fields)),
                );
            }
            LookupOutcome::NotFound => {
                events.log(LogLevel::Warn, format!("Term '{term}' not found (404)."));
                records.push(ResultRecord::synthetic(&store.name, term, "Not Found"));
            }
            LookupOutcome::Empty => {
                events.log(
                    LogLevel::Warn,
                    format!("Term '{term}' returned 0 results."),
                );
                records.push(ResultRecord::synthetic(&store.name, term, "Not Found"));
            }
            LookupOutcome::Failed(reason) => {
                tracing::warn!(term, %reason, "lookup failed");
                events.log(LogLevel::Error, format!("Error for '{term}': {reason}"));
                records.push(ResultRecord::synthetic(&store.name, term, &reason));
            }
        }
    }

    let valid = records.iter().filter(|r| r.is_valid()).count();
    events.log(
        LogLevel::Info,
        format!(
            "Search finished. Total rows: {}, valid records: {valid}.",
            records.len()
        ),
    );
    events.done(records);
}
