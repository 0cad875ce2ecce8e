//! Remote lookup strategies against the tracking API.
//!
//! Two paths exist: a direct point lookup for exact outbound identifiers
//! (`GET {base}/outbounds/0` keyed by the `X-Client-Id` header), and a
//! windowed search over a fixed trailing date window. Responses are read
//! fully and classified into a [`LookupOutcome`] so the run loop never sees
//! transport details.

use crate::config::SearchConfig;
use crate::types::{Direction, SearchField, Store};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::time::Duration;

/// Longest response-body excerpt quoted in failure messages.
const EXCERPT_CHARS: usize = 50;

/// Classified result of one remote lookup for one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LookupOutcome {
    /// Payload object(s), in remote-response order.
    Found(Vec<Map<String, Value>>),
    /// The API answered 404 for the term.
    NotFound,
    /// The API answered 200 with an empty result list.
    Empty,
    /// Bad status, transport failure, or unusable payload. The reason is
    /// carried into the term's synthetic record.
    Failed(String),
}

/// URL of the outbound point-lookup resource.
pub(crate) fn point_lookup_url(base_url: &str) -> String {
    format!("{base_url}/outbounds/0")
}

/// URL of the windowed search resource for a direction.
pub(crate) fn search_url(base_url: &str, direction: Direction) -> String {
    format!("{base_url}/{}", direction.resource())
}

/// Single-entity fetch keyed by an exact identifier. One or zero records.
pub(crate) async fn point_lookup(
    client: &reqwest::Client,
    config: &SearchConfig,
    store: &Store,
    term: &str,
) -> LookupOutcome {
    let url = point_lookup_url(&config.base_url);
    tracing::trace!(%url, term, "point lookup");

    let request = client
        .get(&url)
        .header("X-Client-Id", term)
        .basic_auth(&store.username, Some(&store.password))
        .timeout(Duration::from_secs(config.point_timeout_seconds));

    match execute(request).await {
        Ok((status, body)) => classify_point(status, &body),
        Err(reason) => LookupOutcome::Failed(reason),
    }
}

/// Windowed search over the trailing date window. Zero, one, or many records.
pub(crate) async fn windowed_search(
    client: &reqwest::Client,
    config: &SearchConfig,
    store: &Store,
    direction: Direction,
    field: SearchField,
    term: &str,
) -> LookupOutcome {
    let url = search_url(&config.base_url, direction);
    tracing::trace!(%url, term, field = %field, "windowed search");

    let (start_date, end_date) = window_dates(config.window_days);
    let page_size = config.page_size.to_string();
    let params = [
        ("startDate", start_date.as_str()),
        ("endDate", end_date.as_str()),
        ("search", term),
        ("pageSize", page_size.as_str()),
        (field.query_param(), term),
    ];

    let request = client
        .get(&url)
        .query(&params)
        .basic_auth(&store.username, Some(&store.password))
        .timeout(Duration::from_secs(config.search_timeout_seconds));

    match execute(request).await {
        Ok((status, body)) => classify_search(status, &body, direction.resource()),
        Err(reason) => LookupOutcome::Failed(reason),
    }
}

/// Format the trailing search window as `YYYYMMDD` bounds, UTC.
fn window_dates(window_days: i64) -> (String, String) {
    let end = chrono::Utc::now();
    let start = end - chrono::Duration::days(window_days);
    (
        start.format("%Y%m%d").to_string(),
        end.format("%Y%m%d").to_string(),
    )
}

/// Send the request and read the body. Transport failures become the
/// `Network Error` reason string.
async fn execute(request: reqwest::RequestBuilder) -> Result<(StatusCode, String), String> {
    let response = request
        .send()
        .await
        .map_err(|e| format!("Network Error: {e}"))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Network Error: {e}"))?;
    Ok((status, body))
}

fn classify_point(status: StatusCode, body: &str) -> LookupOutcome {
    match status {
        StatusCode::OK => match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => LookupOutcome::Found(vec![fields]),
            Ok(_) => LookupOutcome::Failed(format!("Unexpected payload shape: {}", excerpt(body))),
            Err(e) => LookupOutcome::Failed(format!("Invalid JSON payload: {e}")),
        },
        StatusCode::NOT_FOUND => LookupOutcome::NotFound,
        status => LookupOutcome::Failed(format!("HTTP {}: {}", status.as_u16(), excerpt(body))),
    }
}

fn classify_search(status: StatusCode, body: &str, results_key: &str) -> LookupOutcome {
    match status {
        StatusCode::OK => {}
        StatusCode::NOT_FOUND => return LookupOutcome::NotFound,
        status => {
            return LookupOutcome::Failed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                excerpt(body)
            ))
        }
    }

    let mut payload = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return LookupOutcome::Failed(format!(
                "Unexpected payload shape: {}",
                excerpt(body)
            ))
        }
        Err(e) => return LookupOutcome::Failed(format!("Invalid JSON payload: {e}")),
    };

    // A missing results key reads as zero results, matching the API's
    // behaviour for windows with no shipments.
    match payload.remove(results_key) {
        None => LookupOutcome::Empty,
        Some(Value::Array(items)) => {
            if items.is_empty() {
                return LookupOutcome::Empty;
            }
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(fields) => records.push(fields),
                    other => {
                        return LookupOutcome::Failed(format!(
                            "Unexpected item shape under '{results_key}': {}",
                            excerpt(&other.to_string())
                        ))
                    }
                }
            }
            LookupOutcome::Found(records)
        }
        Some(_) => LookupOutcome::Failed(format!(
            "Unexpected payload shape under '{results_key}'"
        )),
    }
}

/// Truncate a response body for quoting in a failure message.
fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    trimmed.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        assert_eq!(
            point_lookup_url("https://api.example.com/v1"),
            "https://api.example.com/v1/outbounds/0"
        );
        assert_eq!(
            search_url("https://api.example.com/v1", Direction::Inbound),
            "https://api.example.com/v1/inbounds"
        );
    }

    #[test]
    fn window_dates_are_yyyymmdd() {
        let (start, end) = window_dates(730);
        assert_eq!(start.len(), 8);
        assert_eq!(end.len(), 8);
        assert!(start.chars().all(|c| c.is_ascii_digit()));
        assert!(start < end);
    }

    #[test]
    fn point_200_object_is_found() {
        let outcome = classify_point(StatusCode::OK, r#"{"id": 7}"#);
        match outcome {
            LookupOutcome::Found(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0]["id"], serde_json::json!(7));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn point_200_non_object_fails() {
        let outcome = classify_point(StatusCode::OK, "[1, 2, 3]");
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(reason) if reason.contains("Unexpected payload shape")
        ));
    }

    #[test]
    fn point_200_invalid_json_fails() {
        let outcome = classify_point(StatusCode::OK, "<html>oops</html>");
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(reason) if reason.contains("Invalid JSON")
        ));
    }

    #[test]
    fn point_404_is_not_found() {
        assert_eq!(
            classify_point(StatusCode::NOT_FOUND, ""),
            LookupOutcome::NotFound
        );
    }

    #[test]
    fn point_bad_status_quotes_truncated_body() {
        let body = "e".repeat(200);
        let outcome = classify_point(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match outcome {
            LookupOutcome::Failed(reason) => {
                assert!(reason.starts_with("HTTP 500: "));
                assert!(reason.len() < 80);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn search_200_with_items_is_found_in_order() {
        let body = r#"{"outbounds": [{"id": 1}, {"id": 2}]}"#;
        match classify_search(StatusCode::OK, body, "outbounds") {
            LookupOutcome::Found(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0]["id"], serde_json::json!(1));
                assert_eq!(records[1]["id"], serde_json::json!(2));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn search_200_empty_list_is_empty() {
        let body = r#"{"inbounds": []}"#;
        assert_eq!(
            classify_search(StatusCode::OK, body, "inbounds"),
            LookupOutcome::Empty
        );
    }

    #[test]
    fn search_200_missing_key_is_empty() {
        assert_eq!(
            classify_search(StatusCode::OK, r#"{"total": 0}"#, "outbounds"),
            LookupOutcome::Empty
        );
    }

    #[test]
    fn search_200_non_object_payload_fails() {
        let outcome = classify_search(StatusCode::OK, "42", "outbounds");
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(reason) if reason.contains("Unexpected payload shape")
        ));
    }

    #[test]
    fn search_200_non_object_item_fails() {
        let body = r#"{"outbounds": [{"id": 1}, "stray"]}"#;
        let outcome = classify_search(StatusCode::OK, body, "outbounds");
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(reason) if reason.contains("item shape")
        ));
    }

    #[test]
    fn search_404_is_not_found() {
        assert_eq!(
            classify_search(StatusCode::NOT_FOUND, "", "outbounds"),
            LookupOutcome::NotFound
        );
    }

    #[test]
    fn search_bad_status_fails_with_status() {
        let outcome = classify_search(StatusCode::BAD_GATEWAY, "upstream gone", "outbounds");
        assert!(matches!(
            outcome,
            LookupOutcome::Failed(reason) if reason.starts_with("HTTP 502")
        ));
    }

    #[test]
    fn excerpt_truncates_on_char_boundaries() {
        let body = "ü".repeat(100);
        let cut = excerpt(&body);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
    }
}
