//! Request/response audit records.
//!
//! A client configured with an [`AuditSink`] reports each audited round trip
//! as an [`AuditRecord`]. Storage is up to the sink; the client only pushes.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde::Serialize;
use tracing::info;

use crate::attributes::Attributes;
use crate::method::RestMethod;

/// One request/response pair, as pushed to an [`AuditSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    /// The full request URL, without the query string.
    pub endpoint: String,
    /// The HTTP method.
    #[serde(serialize_with = "serialize_method")]
    pub method: RestMethod,
    /// The attributes sent with the request.
    pub attributes: Attributes,
    /// Response headers, each name mapped to all of its values.
    pub response_headers: BTreeMap<String, Vec<String>>,
    /// The raw response body.
    pub response_body: String,
    /// The HTTP status code.
    pub status_code: u16,
    /// Caller-supplied identifier tying this record to a larger operation.
    pub audit_context: String,
}

fn serialize_method<S: serde::Serializer>(method: &RestMethod, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(method)
}

/// Collects response headers into a name → values map.
///
/// Values that are not valid UTF-8 are replaced lossily.
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        out.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    out
}

/// Destination for audit records.
///
/// Sinks must not fail the request: `record` returns nothing and any storage
/// error is the sink's own to handle.
pub trait AuditSink: Send + Sync {
    /// Persists or forwards one record.
    fn record(&self, record: &AuditRecord);
}

/// Sink that emits each record as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) {
        let attributes = serde_json::to_string(&record.attributes).unwrap_or_default();
        let headers = serde_json::to_string(&record.response_headers).unwrap_or_default();
        info!(
            target: "moxiworks_platform::audit",
            endpoint = %record.endpoint,
            method = %record.method,
            status_code = record.status_code,
            audit_context = %record.audit_context,
            attributes = %attributes,
            response_headers = %headers,
            response_body = %record.response_body,
            "platform request audited"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, SET_COOKIE};

    fn record() -> AuditRecord {
        AuditRecord {
            endpoint: "https://example.com/api/action_logs".to_string(),
            method: RestMethod::Post,
            attributes: Attributes::new().with("title", "Keys picked up"),
            response_headers: BTreeMap::new(),
            response_body: "{}".to_string(),
            status_code: 200,
            audit_context: "import-42".to_string(),
        }
    }

    #[test]
    fn test_collect_headers_keeps_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        let collected = collect_headers(&headers);
        assert_eq!(collected["set-cookie"], vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_record_serializes_method_as_string() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["attributes"]["title"], "Keys picked up");
        assert_eq!(json["audit_context"], "import-42");
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_tracing_sink_emits_event() {
        TracingAuditSink.record(&record());
        assert!(logs_contain("platform request audited"));
        assert!(logs_contain("import-42"));
    }
}
