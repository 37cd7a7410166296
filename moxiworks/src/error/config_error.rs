//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These occur while building a [`PlatformConfig`](crate::PlatformConfig)
/// or [`Credentials`](crate::Credentials), typically from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL has no path to append `/api/...` to, as with `data:` or
    /// `mailto:` URLs.
    #[error("URL cannot be used as a base: {url}")]
    NotABase {
        /// The offending URL.
        url: String,
    },

    /// A required environment variable is unset or empty.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The variable that was looked up.
        var: &'static str,
    },
}
