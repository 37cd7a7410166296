//! Typed client for the MoxiWorks Platform REST API.
//!
//! The platform exposes agents, contacts, transactions and action logs as
//! REST resources. This crate maps each to a typed struct with the
//! operations the platform supports, all funnelled through one blocking
//! transport.
//!
//! ## Features
//!
//! - **One transport path**: Basic auth, versioned `Accept` header, query
//!   string for reads and form bodies for writes, JSON envelope validation
//! - **Session continuity**: the first session cookie the platform hands out
//!   is replayed on every later request from the same client
//! - **Layered errors**: authorization, argument, parse and remote failures
//!   are distinct variants of [`PlatformError`]
//! - **Audit hook**: round trips can be reported to an [`AuditSink`]
//! - **Tolerant schemas**: unknown response keys are ignored
//!
//! ## Example
//!
//! ```rust,ignore
//! use moxiworks_platform::{Agent, Attributes, Credentials, PlatformClient, PlatformConfig};
//!
//! let client = PlatformClient::new(PlatformConfig::default(), Credentials::from_env()?)?;
//!
//! let page = Agent::search(
//!     &client,
//!     &Attributes::new()
//!         .with("moxi_works_company_id", "the_company")
//!         .with("updated_since", 1463595006),
//! )?;
//!
//! if let Some(page) = page {
//!     for agent in page.entries() {
//!         println!("{:?}", agent.name);
//!     }
//! }
//! ```

pub mod attributes;
pub mod audit;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod headers;
pub mod method;
pub mod resource;
pub mod response;
pub mod session;

// Re-exports for convenience
pub use attributes::Attributes;
pub use audit::{AuditRecord, AuditSink, TracingAuditSink};
pub use client::{PlatformClient, PlatformClientBuilder};
pub use config::PlatformConfig;
pub use credentials::Credentials;
pub use error::{
    ArgumentError, AuthError, ClientError, ConfigError, PlatformError, ResponseError,
};
pub use method::RestMethod;
pub use resource::{ActionLog, Agent, BuyerTransaction, Contact, Resource, SearchPage};
pub use response::Envelope;
pub use session::Session;
