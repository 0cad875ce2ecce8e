//! Core types for search requests, result records, and progress events.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field name under which a synthetic error record stores the term that
/// produced it.
pub const TERM_FIELD: &str = "searchedTerm";

/// Credentials and identity for a single store.
///
/// Loaded by the caller (credential discovery is outside this crate) and
/// read-only to the search engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Store identifier as known to the tracking API.
    pub id: String,
    /// Human-readable display name; tagged onto every result record.
    pub name: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
}

/// Lookup category, determining the resource path and valid search fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Outbound shipments (deliveries).
    Outbound,
    /// Inbound shipments (returns).
    Inbound,
}

impl Direction {
    /// Returns the human-readable name of this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Outbound => "Outbound",
            Self::Inbound => "Inbound",
        }
    }

    /// Returns the API resource path segment (`outbounds` / `inbounds`).
    ///
    /// The windowed search endpoint also nests its result list under this
    /// same key in the response body.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Outbound => "outbounds",
            Self::Inbound => "inbounds",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Searchable fields on the tracking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    /// Exact shipment identifier. Outbound searches on this field use the
    /// direct point-lookup path instead of the windowed search.
    ClientId,
    /// Sales-channel identifier (outbound only).
    ChannelId,
    /// Supplier reference (inbound only).
    SupplierReference,
}

impl SearchField {
    /// Returns the human-readable name of this field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClientId => "Client ID",
            Self::ChannelId => "Channel ID",
            Self::SupplierReference => "Supplier Reference",
        }
    }

    /// Returns the query-parameter name the windowed search endpoint expects
    /// for this field.
    pub fn query_param(&self) -> &'static str {
        match self {
            Self::ClientId => "clientId",
            Self::ChannelId => "channelId",
            Self::SupplierReference => "supplierReference",
        }
    }

    /// Whether this field is searchable for the given direction.
    pub fn valid_for(&self, direction: Direction) -> bool {
        match self {
            Self::ClientId => true,
            Self::ChannelId => direction == Direction::Outbound,
            Self::SupplierReference => direction == Direction::Inbound,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One search invocation: which store, which direction/field, which terms.
///
/// Terms are processed strictly in order. Duplicates are preserved and
/// searched independently.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Store whose credentials authorise the lookups.
    pub store: Store,
    /// Outbound or inbound search.
    pub direction: Direction,
    /// Field the terms are matched against.
    pub field: SearchField,
    /// Ordered, non-empty list of search terms.
    pub terms: Vec<String>,
}

impl SearchRequest {
    /// Validates this request, returning an error if it cannot be executed.
    ///
    /// Checks:
    /// - `terms` must not be empty
    /// - every term must be non-blank
    /// - `field` must be valid for `direction`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.terms.is_empty() {
            return Err(SearchError::Request(
                "at least one search term is required".into(),
            ));
        }
        if self.terms.iter().any(|t| t.trim().is_empty()) {
            return Err(SearchError::Request(
                "search terms must be non-empty".into(),
            ));
        }
        if !self.field.valid_for(self.direction) {
            return Err(SearchError::Request(format!(
                "{} is not a valid field for {} searches",
                self.field, self.direction
            )));
        }
        Ok(())
    }
}

/// Split a raw operator input string into individual search terms.
///
/// Terms are separated by commas or newlines; surrounding whitespace is
/// trimmed and blank entries dropped. Duplicates are kept.
pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Severity of a progress notice on the event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// Request-trace detail (URLs, headers).
    Debug,
    /// Normal progress.
    Info,
    /// Term produced no results.
    Warn,
    /// Remote call failed.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A single record produced for a search term.
///
/// Either a payload returned by the tracking API (arbitrarily nested JSON
/// object), or a synthetic placeholder carrying the reason no payload could
/// be produced. Always tagged with the store's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Display name of the store this record came from.
    pub store_name: String,
    /// Raw payload fields. Nested objects and arrays are legal here; the
    /// flattener reduces them for display and export.
    pub fields: Map<String, Value>,
    /// Set on synthetic records when the term produced no payload.
    pub error_reason: Option<String>,
}

impl ResultRecord {
    /// Wrap a payload object returned by the API, tagged with the store name.
    pub fn from_payload(store_name: &str, fields: Map<String, Value>) -> Self {
        Self {
            store_name: store_name.to_owned(),
            fields,
            error_reason: None,
        }
    }

    /// Build the synthetic placeholder record for an unsatisfied term, so
    /// that no term is silently dropped from the batch.
    pub fn synthetic(store_name: &str, term: &str, reason: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(TERM_FIELD.to_owned(), Value::String(term.to_owned()));
        Self {
            store_name: store_name.to_owned(),
            fields,
            error_reason: Some(reason.to_owned()),
        }
    }

    /// Whether this record carries a real payload rather than an error
    /// placeholder.
    pub fn is_valid(&self) -> bool {
        self.error_reason.is_none()
    }
}

/// Events published by a search run, in order: zero or more `Log` events
/// followed by exactly one terminal `Done`.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A progress notice for live display.
    Log {
        /// Severity of the notice.
        level: LogLevel,
        /// Human-readable message.
        message: String,
    },
    /// Terminal event carrying the full accumulated record batch.
    Done {
        /// All records, in term-submission order; within a term, in
        /// remote-response order.
        records: Vec<ResultRecord>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_store() -> Store {
        Store {
            id: "7b0fb2ac".into(),
            name: "Diesel".into(),
            username: "user".into(),
            password: "pass".into(),
        }
    }

    fn make_request(terms: Vec<&str>) -> SearchRequest {
        SearchRequest {
            store: make_store(),
            direction: Direction::Outbound,
            field: SearchField::ClientId,
            terms: terms.into_iter().map(str::to_owned).collect(),
        }
    }

    #[test]
    fn direction_resource_paths() {
        assert_eq!(Direction::Outbound.resource(), "outbounds");
        assert_eq!(Direction::Inbound.resource(), "inbounds");
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Outbound.to_string(), "Outbound");
        assert_eq!(Direction::Inbound.to_string(), "Inbound");
    }

    #[test]
    fn field_query_params() {
        assert_eq!(SearchField::ClientId.query_param(), "clientId");
        assert_eq!(SearchField::ChannelId.query_param(), "channelId");
        assert_eq!(
            SearchField::SupplierReference.query_param(),
            "supplierReference"
        );
    }

    #[test]
    fn field_validity_per_direction() {
        assert!(SearchField::ClientId.valid_for(Direction::Outbound));
        assert!(SearchField::ClientId.valid_for(Direction::Inbound));
        assert!(SearchField::ChannelId.valid_for(Direction::Outbound));
        assert!(!SearchField::ChannelId.valid_for(Direction::Inbound));
        assert!(SearchField::SupplierReference.valid_for(Direction::Inbound));
        assert!(!SearchField::SupplierReference.valid_for(Direction::Outbound));
    }

    #[test]
    fn valid_request_passes() {
        let request = make_request(vec!["A1", "A2"]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_terms_rejected() {
        let request = make_request(vec![]);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("at least one search term"));
    }

    #[test]
    fn blank_term_rejected() {
        let request = make_request(vec!["A1", "  "]);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn invalid_field_direction_pair_rejected() {
        let mut request = make_request(vec!["A1"]);
        request.field = SearchField::SupplierReference;
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("Supplier Reference"));
        assert!(err.to_string().contains("Outbound"));
    }

    #[test]
    fn parse_terms_splits_on_commas_and_newlines() {
        let terms = parse_terms("A1, A2\nA3 ,\n, A4");
        assert_eq!(terms, vec!["A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn parse_terms_keeps_duplicates() {
        let terms = parse_terms("A1,A1");
        assert_eq!(terms, vec!["A1", "A1"]);
    }

    #[test]
    fn parse_terms_empty_input() {
        assert!(parse_terms("").is_empty());
        assert!(parse_terms(" ,\n, ").is_empty());
    }

    #[test]
    fn log_level_display() {
        assert_eq!(LogLevel::Debug.to_string(), "DEBUG");
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn payload_record_is_valid() {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(42));
        let record = ResultRecord::from_payload("Diesel", fields);
        assert!(record.is_valid());
        assert_eq!(record.store_name, "Diesel");
        assert_eq!(record.fields["id"], json!(42));
    }

    #[test]
    fn synthetic_record_carries_term_and_reason() {
        let record = ResultRecord::synthetic("Diesel", "A2", "Not Found");
        assert!(!record.is_valid());
        assert_eq!(record.fields[TERM_FIELD], json!("A2"));
        assert_eq!(record.error_reason.as_deref(), Some("Not Found"));
    }

    #[test]
    fn result_record_serde_round_trip() {
        let record = ResultRecord::synthetic("Diesel", "A2", "Not Found");
        let encoded = serde_json::to_string(&record).expect("serialize");
        let decoded: ResultRecord = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded.store_name, "Diesel");
        assert_eq!(decoded.error_reason.as_deref(), Some("Not Found"));
    }
}
