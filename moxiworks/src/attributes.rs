//! Request attribute maps and their wire encoding.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ArgumentError;

/// The key/value set describing one request's parameters.
///
/// Values are JSON scalars or arrays. On the wire they are flattened into
/// `key=value` pairs by [`to_pairs`](Self::to_pairs); the transport decides
/// whether those pairs go into the query string or a form body. Pairs come
/// out in key order whatever order the keys were inserted in.
///
/// ## Examples
///
/// ```rust
/// use moxiworks_platform::Attributes;
///
/// let attrs = Attributes::new()
///     .with("moxi_works_agent_id", "abc123")
///     .with("page_number", 2);
///
/// assert!(attrs.contains_key("page_number"));
/// assert_eq!(
///     attrs.to_pairs(),
///     vec![
///         ("moxi_works_agent_id".to_string(), "abc123".to_string()),
///         ("page_number".to_string(), "2".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, consuming and returning the map.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` rendered as it would be sent, for
    /// scalar values only.
    pub fn get_scalar(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns `true` if `key` is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes an attribute.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over attribute keys and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the keys from `required` that are absent, in declaration order.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|key| !self.contains_key(key))
            .collect()
    }

    /// Checks that every key in `required` is present.
    ///
    /// ## Errors
    ///
    /// Returns `ArgumentError::MissingRequired` naming exactly the absent keys.
    pub fn require(&self, required: &[&str]) -> Result<(), ArgumentError> {
        let missing = self.missing(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ArgumentError::missing(missing))
        }
    }

    /// Builds attributes from any serializable record, dropping `null`s.
    ///
    /// Anything that does not serialize to a JSON object yields an empty map.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect()),
            _ => Ok(Self::new()),
        }
    }

    /// Flattens the attributes into `key=value` pairs, sorted by key.
    ///
    /// - strings and numbers are sent as-is
    /// - booleans become `1` / `0`
    /// - `null` values are omitted
    /// - arrays become `key[0]`, `key[1]`, ...
    /// - objects become `key[field]`
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut pairs = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            flatten(key.clone(), value, &mut pairs);
        }
        pairs
    }
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(format!("{key}[{i}]"), item, out);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten(format!("{key}[{field}]"), item, out);
            }
        }
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
