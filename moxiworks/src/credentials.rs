//! Platform credentials.

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Environment variable holding the platform identifier.
pub const IDENTIFIER_ENV: &str = "MOXIWORKS_PLATFORM_IDENTIFIER";
/// Environment variable holding the platform secret.
pub const SECRET_ENV: &str = "MOXIWORKS_PLATFORM_SECRET";

/// An identifier/secret pair issued by the platform.
///
/// Credentials are immutable once built. An incomplete pair is not replaced
/// with defaults: [`is_ready`](Self::is_ready) reports it and header assembly
/// refuses to proceed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from an identifier and secret.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Reads credentials from `MOXIWORKS_PLATFORM_IDENTIFIER` and
    /// `MOXIWORKS_PLATFORM_SECRET`.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::MissingEnv` naming the first variable that is
    /// unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let identifier = read_env(IDENTIFIER_ENV)?;
        let secret = read_env(SECRET_ENV)?;
        Ok(Self::new(identifier, secret))
    }

    /// Returns `true` when both the identifier and the secret are non-empty.
    pub fn is_ready(&self) -> bool {
        !self.identifier.is_empty() && !self.secret.is_empty()
    }

    /// The platform identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The platform secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// The secret never reaches logs through `{:?}`.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn read_env(var: &'static str) -> Result<String, ConfigError> {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingEnv { var })
}
