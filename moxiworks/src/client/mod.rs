//! HTTP transport.
//!
//! Every resource call funnels through [`PlatformClient`]: headers are
//! assembled, attributes encoded (query string for GET, form body for
//! everything else), the request sent synchronously, the session cookie
//! captured, and the JSON envelope validated.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use moxiworks_platform::{Attributes, Credentials, PlatformClient, PlatformConfig, RestMethod};
//!
//! let client = PlatformClient::builder(PlatformConfig::default())
//!     .credentials(Credentials::new("partner-id", "partner-secret"))
//!     .build()?;
//!
//! let url = client.config().api_url("agents", None);
//! let envelope = client.send(
//!     RestMethod::Get,
//!     url,
//!     &Attributes::new().with("moxi_works_company_id", "abc"),
//! )?;
//! ```

mod transport;

pub use transport::{PlatformClient, PlatformClientBuilder};
