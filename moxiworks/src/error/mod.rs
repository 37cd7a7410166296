//! Layered error types for the platform client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`PlatformError`] - Top-level error type for all platform operations
//! - [`AuthError`] - Credentials missing or incomplete
//! - [`ArgumentError`] - Required request attributes missing
//! - [`ResponseError`] - Unparseable bodies and remote failure envelopes
//! - [`ClientError`] - HTTP client and network errors
//! - [`ConfigError`] - Base URL and environment configuration errors

mod argument_error;
mod auth_error;
mod client_error;
mod config_error;
mod platform_error;
mod response_error;

pub use argument_error::ArgumentError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use platform_error::PlatformError;
pub use response_error::{GENERIC_FAILURE_MESSAGE, ResponseError};
