//! Authentication errors.

use thiserror::Error;

/// Errors related to platform authentication.
///
/// These are raised while assembling request headers, so they always surface
/// before any network I/O is attempted.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identifier or secret is absent or empty.
    #[error("platform credentials must be set before using the client")]
    CredentialsNotSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_not_set_display() {
        let err = AuthError::CredentialsNotSet;
        assert_eq!(
            err.to_string(),
            "platform credentials must be set before using the client"
        );
    }
}
