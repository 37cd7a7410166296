//! Action log entries: the activity history kept for a contact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Resource, SearchPage, lenient, send_one, send_search};
use crate::attributes::Attributes;
use crate::client::PlatformClient;
use crate::error::PlatformError;
use crate::method::RestMethod;

/// An entry in a contact's action log.
///
/// Created entries come back with the fields below; search results carry
/// the platform's own shape for each entry (`moxi_works_action_log_id`,
/// `type`, `timestamp`, `log_data`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionLog {
    /// Platform ID of the agent the entry belongs to.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_agent_id: Option<String>,
    /// Your system's ID for the contact.
    #[serde(deserialize_with = "lenient::string")]
    pub partner_contact_id: Option<String>,
    /// Platform ID of this entry.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_action_log_id: Option<String>,
    /// Short description, 85 characters or less.
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    /// Entry body, 255 characters or less.
    #[serde(deserialize_with = "lenient::string")]
    pub body: Option<String>,
    /// Lowercase, underscore-separated entry kind.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    /// Unix timestamp of creation.
    #[serde(deserialize_with = "lenient::int")]
    pub timestamp: Option<i64>,
    /// Payload whose shape depends on `kind`.
    pub log_data: Option<Value>,
}

impl Resource for ActionLog {
    const NAME: &'static str = "ActionLog";
    const COLLECTION: &'static str = "action_logs";
    const RESULTS_KEY: &'static str = "actions";
}

impl ActionLog {
    /// Keys every action log request must carry.
    pub const REQUIRED: &'static [&'static str] = &["moxi_works_agent_id", "partner_contact_id"];

    /// Creates an action log entry.
    ///
    /// `title` (85 characters or less) and `body` (255 characters or less)
    /// are optional.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let entry = ActionLog::create(
    ///     &client,
    ///     &Attributes::new()
    ///         .with("moxi_works_agent_id", "123abc")
    ///         .with("partner_contact_id", "1234")
    ///         .with("title", "Client Picked Up House Keys!")
    ///         .with("body", "Firstname Lastname came by the office to pick up their keys"),
    /// )?;
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns `ArgumentError` naming the missing keys before any request.
    pub fn create(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        send_one(client, RestMethod::Post, None, attributes)
    }

    /// Lists the action log entries for one of an agent's contacts.
    ///
    /// Results are under the `actions` key.
    pub fn search(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<SearchPage<Self>>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        send_search(client, attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_field_maps_to_kind() {
        let envelope = json!({
            "moxi_works_action_log_id": "log-1",
            "type": "agent_created",
            "timestamp": 1463595006,
            "log_data": {"agent_action": "created"}
        });
        let entry = ActionLog::from_envelope(envelope.as_object().cloned().unwrap()).unwrap();
        assert_eq!(entry.kind.as_deref(), Some("agent_created"));
        assert_eq!(entry.timestamp, Some(1463595006));
        assert_eq!(entry.log_data, Some(json!({"agent_action": "created"})));

        let attrs = entry.to_attributes().unwrap();
        assert!(attrs.contains_key("type"));
        assert!(!attrs.contains_key("kind"));
    }
}
