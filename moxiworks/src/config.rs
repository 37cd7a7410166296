//! Client configuration: base URL and debug switch.

use std::env;

use url::Url;

use crate::error::ConfigError;

/// Production base URL of the platform.
pub const DEFAULT_BASE_URL: &str = "https://api.moxiworks.com";
/// Environment variable overriding the base URL.
pub const URL_ENV: &str = "MOXIWORKS_PLATFORM_URL";
/// Environment variable enabling verbose transport logging.
pub const DEBUG_ENV: &str = "MOXIWORKS_PLATFORM_DEBUG";

/// Where requests go and whether the transport logs verbosely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    base_url: Url,
    debug: bool,
}

impl PlatformConfig {
    /// Creates a configuration for the given base URL with debugging off.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::NotABase` if the URL cannot carry a path.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::NotABase {
                url: base_url.to_string(),
            });
        }
        Ok(Self {
            base_url,
            debug: false,
        })
    }

    /// Parses `base_url` and creates a configuration for it.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL cannot be parsed, or
    /// `ConfigError::NotABase` if it cannot carry a path.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(Url::parse(base_url)?)
    }

    /// Reads `MOXIWORKS_PLATFORM_URL` and `MOXIWORKS_PLATFORM_DEBUG`, falling
    /// back to the production URL with debugging off.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let debug = env::var(DEBUG_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self::parse(&base_url)?.with_debug(debug))
    }

    /// Enables or disables verbose transport logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The base URL every resource path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether verbose transport logging is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Builds `{base}/api/{resource}` or `{base}/api/{resource}/{id}`, keeping
    /// any path prefix on the base URL.
    ///
    /// The identifier is a single percent-encoded segment, so `"abc 1"` becomes
    /// `abc%201` and a `/` inside it cannot escape the collection.
    pub fn api_url(&self, resource: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects URLs that cannot be a base, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("api").push(resource);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            debug: false,
        }
    }
}
