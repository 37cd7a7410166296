//! Response parsing and remote failure errors.

use thiserror::Error;

/// Detail used when a failure envelope carries no `messages`.
pub const GENERIC_FAILURE_MESSAGE: &str = "unable to perform remote action on the platform";

/// Errors raised once a response has been received.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The response body was not valid JSON.
    #[error("unable to parse remote response: {source}\n response:\n  {body}")]
    Parse {
        /// The raw body text, kept for diagnostics.
        body: String,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The platform reported a failure, or answered with something other than
    /// a JSON object.
    #[error("{message}")]
    RemoteFailure {
        /// The server messages joined with a comma, or a generic fallback.
        message: String,
    },

    /// A successful payload could not be shaped into the expected resource,
    /// for example a search entry that is not an object.
    #[error("unable to decode {resource} from response: {source}")]
    Decode {
        /// The resource type being reconstructed.
        resource: &'static str,
        /// The underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl ResponseError {
    /// Creates a remote failure error with the given detail.
    pub fn remote_failure(message: impl Into<String>) -> Self {
        Self::RemoteFailure {
            message: message.into(),
        }
    }

    /// Returns `true` if the response body could not be parsed as JSON.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns the server's joined failure messages for a remote failure.
    pub fn server_messages(&self) -> Option<&str> {
        match self {
            Self::RemoteFailure { message } => Some(message),
            _ => None,
        }
    }

    /// Returns the raw body of an unparseable response.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Parse { body, .. } => Some(body),
            _ => None,
        }
    }
}
