//! Typed platform resources.
//!
//! Each resource is an explicit schema: a struct of optional fields named
//! after the platform's attributes. Reconstruction keeps the keys a type
//! declares and silently drops the rest, so fields the platform adds later
//! never break older clients. Scalar fields decode leniently: a number sent
//! where a string is declared (or the reverse) is converted, and a value that
//! cannot be converted leaves the field `None`.
//!
//! The operations on each resource share one shape:
//!
//! 1. check the operation's required attribute keys (`ArgumentError` before
//!    any I/O)
//! 2. build `{base}/api/{collection}` or `{base}/api/{collection}/{id}`
//! 3. send through [`PlatformClient`]
//! 4. rebuild typed values, mapping an empty response to `None`
//!
//! ## Resources
//!
//! - [`Agent`] - find, search
//! - [`ActionLog`] - create, search
//! - [`BuyerTransaction`] - create, find, update, search, save
//! - [`Contact`] - create, find, update, search, save

mod action_log;
mod agent;
mod buyer_transaction;
mod contact;
mod lenient;
mod page;

pub use action_log::ActionLog;
pub use agent::Agent;
pub use buyer_transaction::BuyerTransaction;
pub use contact::Contact;
pub use page::SearchPage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::attributes::Attributes;
use crate::client::PlatformClient;
use crate::error::{ArgumentError, PlatformError, ResponseError};
use crate::method::RestMethod;
use crate::response::Envelope;

/// A platform entity type.
pub trait Resource: DeserializeOwned + Serialize {
    /// Type name used in diagnostics.
    const NAME: &'static str;
    /// Collection path segment under `/api/`.
    const COLLECTION: &'static str;
    /// Envelope key holding search results.
    const RESULTS_KEY: &'static str;

    /// Rebuilds a value from a response object, ignoring unknown keys.
    ///
    /// ## Errors
    ///
    /// Returns `ResponseError::Decode` when the payload cannot be shaped into
    /// `Self`.
    fn from_envelope(envelope: Envelope) -> Result<Self, ResponseError> {
        from_value(Value::Object(envelope))
    }

    /// Returns the value's non-null fields as request attributes.
    fn to_attributes(&self) -> Result<Attributes, ResponseError> {
        Attributes::from_record(self).map_err(|source| ResponseError::Decode {
            resource: Self::NAME,
            source,
        })
    }
}

pub(crate) fn from_value<T: Resource>(value: Value) -> Result<T, ResponseError> {
    serde_json::from_value(value).map_err(|source| ResponseError::Decode {
        resource: T::NAME,
        source,
    })
}

/// Sends a single-object request and rebuilds the result.
///
/// An empty response object maps to `None`.
pub(crate) fn send_one<T: Resource>(
    client: &PlatformClient,
    method: RestMethod,
    id: Option<&str>,
    attributes: &Attributes,
) -> Result<Option<T>, PlatformError> {
    let url = client.config().api_url(T::COLLECTION, id);
    let envelope = client.send(method, url, attributes)?;
    if envelope.is_empty() {
        return Ok(None);
    }
    Ok(Some(T::from_envelope(envelope)?))
}

/// Sends a search request and rebuilds the page of results.
///
/// An empty response object maps to `None`.
pub(crate) fn send_search<T: Resource>(
    client: &PlatformClient,
    attributes: &Attributes,
) -> Result<Option<SearchPage<T>>, PlatformError> {
    let url = client.config().api_url(T::COLLECTION, None);
    let envelope = client.send(RestMethod::Get, url, attributes)?;
    if envelope.is_empty() {
        return Ok(None);
    }
    Ok(Some(SearchPage::from_envelope(envelope)?))
}

/// Returns the identifier under `key` as a URL segment.
///
/// Callers check presence first; a present but non-scalar value is reported
/// as missing.
pub(crate) fn identifier(attributes: &Attributes, key: &'static str) -> Result<String, PlatformError> {
    attributes
        .get_scalar(key)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ArgumentError::missing([key]).into())
}
