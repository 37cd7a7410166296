//! Caller argument errors.

use thiserror::Error;

/// Errors raised when a caller omits attributes an operation requires.
///
/// Like [`AuthError`](super::AuthError), these are detected before any
/// request is sent.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// One or more required attribute keys are absent.
    #[error("{} required", .keys.join(","))]
    MissingRequired {
        /// The missing keys, in the order the operation declares them.
        keys: Vec<String>,
    },

    /// Neither of two interchangeable identifiers was supplied.
    #[error("either {first} or {second} is required")]
    MissingEither {
        /// The preferred identifier key.
        first: &'static str,
        /// The fallback identifier key.
        second: &'static str,
    },
}

impl ArgumentError {
    /// Creates a missing-keys error from the keys that were not supplied.
    pub fn missing<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingRequired {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}
