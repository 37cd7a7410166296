//! Top-level platform error type.

use super::{ArgumentError, AuthError, ClientError, ConfigError, ResponseError};
use thiserror::Error;

/// Top-level error type for all platform operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use moxiworks_platform::PlatformError;
///
/// fn handle_error(err: PlatformError) {
///     match err {
///         PlatformError::Auth(e) => eprintln!("Credentials: {e}"),
///         PlatformError::Argument(e) => eprintln!("Bad call: {e}"),
///         PlatformError::Response(e) => eprintln!("Platform said no: {e}"),
///         PlatformError::Client(e) => eprintln!("Network error: {e}"),
///         PlatformError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Credentials unset or incomplete.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A required attribute was not supplied.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// Response parse failures and remote failure envelopes.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// HTTP client errors (network, connection failures).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PlatformError {
    /// Returns `true` if the platform reported the request as failed.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Self::Response(ResponseError::RemoteFailure { .. }))
    }

    /// Returns `true` if the response body was not valid JSON.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Response(e) if e.is_parse_error())
    }
}
