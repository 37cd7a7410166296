//! Paged search results.

use serde_json::Value;

use super::{Resource, from_value};
use crate::error::ResponseError;
use crate::response::Envelope;

/// One page of search results.
///
/// The resource's results key (`agents`, `actions`, `transactions`, ...) is
/// replaced by typed values in response order. Every other key, pagination
/// included, is kept exactly as the platform sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage<T> {
    results_key: &'static str,
    entries: Vec<T>,
    rest: Envelope,
}

impl<T: Resource> SearchPage<T> {
    /// Splits a search response into typed entries and the remaining keys.
    ///
    /// A missing or `null` results key yields an empty page.
    ///
    /// ## Errors
    ///
    /// Returns `ResponseError::Decode` if the results key is not an array or
    /// an entry does not match the resource schema.
    pub fn from_envelope(mut envelope: Envelope) -> Result<Self, ResponseError> {
        let entries = match envelope.remove(T::RESULTS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(from_value::<T>)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(not_an_array::<T>()),
        };

        Ok(Self {
            results_key: T::RESULTS_KEY,
            entries,
            rest: envelope,
        })
    }
}

fn not_an_array<T: Resource>() -> ResponseError {
    ResponseError::Decode {
        resource: T::NAME,
        source: <serde_json::Error as serde::de::Error>::custom(format!(
            "`{}` is not an array",
            T::RESULTS_KEY
        )),
    }
}

impl<T> SearchPage<T> {
    /// The envelope key the entries came from.
    pub fn results_key(&self) -> &'static str {
        self.results_key
    }

    /// The typed entries, in response order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Consumes the page, returning its entries.
    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    /// Number of entries on this page.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the page has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `page_number` key, if it holds a non-negative integer.
    pub fn page_number(&self) -> Option<u64> {
        self.rest.get("page_number").and_then(Value::as_u64)
    }

    /// The `total_pages` key, if it holds a non-negative integer.
    pub fn total_pages(&self) -> Option<u64> {
        self.rest.get("total_pages").and_then(Value::as_u64)
    }

    /// Returns `true` when a later page exists.
    pub fn has_next_page(&self) -> bool {
        matches!(
            (self.page_number(), self.total_pages()),
            (Some(page), Some(total)) if page < total
        )
    }

    /// Any other envelope key, untouched.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.rest.get(key)
    }

    /// All envelope keys other than the results key.
    pub fn rest(&self) -> &Envelope {
        &self.rest
    }
}
