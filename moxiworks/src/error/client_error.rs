//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP client layer.
///
/// These represent failures to build or deliver a request. A response that
/// arrives, whatever its status code, is handled by the response layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// A header value could not be encoded.
    #[error("invalid {name} header value: {reason}")]
    InvalidHeader {
        /// The header that failed to encode.
        name: &'static str,
        /// Why it failed.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_display() {
        let err = ClientError::InvalidHeader {
            name: "Cookie",
            reason: "contains a newline".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid Cookie header value: contains a newline"
        );
    }
}
