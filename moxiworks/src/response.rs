//! Response envelope validation.
//!
//! Every platform response is a JSON object. Failures are reported in-band
//! with `"status": "fail"` or `"status": "error"` and an optional `messages`
//! array; anything else is passed through untouched for the resource layer.

use serde_json::{Map, Value};

use crate::error::{GENERIC_FAILURE_MESSAGE, ResponseError};

/// A decoded response object.
pub type Envelope = Map<String, Value>;

/// Envelope key carrying the outcome.
pub const STATUS_KEY: &str = "status";
/// Envelope key carrying server messages.
pub const MESSAGES_KEY: &str = "messages";

/// Checks a decoded response and hands back the object it contains.
///
/// An empty object is a valid "no data" answer, not a failure; so is an
/// object without a `status` key or with any status other than `fail` or
/// `error`.
///
/// ## Errors
///
/// Returns `ResponseError::RemoteFailure` when the value is not an object or
/// its status is `fail` / `error`. The detail is the `messages` entries
/// joined with a comma, or a generic message when there are none.
pub fn validate(decoded: Value) -> Result<Envelope, ResponseError> {
    let Value::Object(envelope) = decoded else {
        return Err(ResponseError::remote_failure(GENERIC_FAILURE_MESSAGE));
    };

    let failed = matches!(
        envelope.get(STATUS_KEY).and_then(Value::as_str),
        Some("fail" | "error")
    );
    if failed {
        return Err(ResponseError::remote_failure(failure_message(&envelope)));
    }

    Ok(envelope)
}

/// Joins the envelope's `messages` with a comma, falling back to a generic
/// message when the key is absent or not an array.
pub fn failure_message(envelope: &Envelope) -> String {
    match envelope.get(MESSAGES_KEY) {
        Some(Value::Array(messages)) => messages
            .iter()
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}
