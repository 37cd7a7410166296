//! Agents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Resource, SearchPage, lenient, send_one, send_search};
use crate::attributes::Attributes;
use crate::client::PlatformClient;
use crate::error::{ArgumentError, PlatformError};
use crate::method::RestMethod;

/// An agent on the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    /// Platform ID of the agent.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_agent_id: Option<String>,
    /// UUID of the office the agent is associated with.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_office_id: Option<String>,
    /// The agent's ID in their company's own system.
    #[serde(deserialize_with = "lenient::string")]
    pub client_agent_id: Option<String>,
    /// The office's ID in the company's own system.
    #[serde(deserialize_with = "lenient::string")]
    pub client_office_id: Option<String>,
    /// The company's ID in its own system.
    #[serde(deserialize_with = "lenient::string")]
    pub client_company_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub mls_agent_id: Option<String>,
    /// License number.
    #[serde(deserialize_with = "lenient::string")]
    pub license: Option<String>,
    /// Primary MLS name.
    #[serde(deserialize_with = "lenient::string")]
    pub mls_name: Option<String>,
    /// Primary MLS abbreviation.
    #[serde(deserialize_with = "lenient::string")]
    pub mls_abbreviation: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub agent_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub office_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub company_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub alt_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub lead_routing_email_address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub gc_goal: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub office_address_street: Option<String>,
    /// Suite or office number.
    #[serde(deserialize_with = "lenient::string")]
    pub office_address_street2: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub office_address_city: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub office_address_state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub office_address_zip: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub mobile_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub fax_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub main_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub office_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub primary_email_address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub secondary_email_address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub twitter: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub google_plus: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub facebook: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_page: Option<String>,
    /// Full-size profile image.
    #[serde(deserialize_with = "lenient::string")]
    pub profile_image_url: Option<String>,
    /// Thumbnail profile image.
    #[serde(deserialize_with = "lenient::string")]
    pub profile_thumb_url: Option<String>,
    /// Business titles held by the agent.
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub uuid: Option<String>,
    /// Whether the agent can use Engage.
    #[serde(deserialize_with = "lenient::boolean")]
    pub has_engage_access: Option<bool>,
    /// MLSs available to the agent.
    #[serde(deserialize_with = "lenient::list")]
    pub available_mls: Option<Vec<Value>>,
    /// Offices other than the primary one.
    #[serde(deserialize_with = "lenient::list")]
    pub alternate_offices: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::int")]
    pub gci_goal: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::float")]
    pub buyer_commission_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    pub seller_commission_rate: Option<f64>,
    /// Unix timestamp.
    #[serde(deserialize_with = "lenient::int")]
    pub created_timestamp: Option<i64>,
    /// Unix timestamp; absent while the agent is active.
    #[serde(deserialize_with = "lenient::int")]
    pub deactivated_timestamp: Option<i64>,
    /// Unix timestamp of the last change.
    #[serde(deserialize_with = "lenient::int")]
    pub last_updated: Option<i64>,
}

impl Resource for Agent {
    const NAME: &'static str = "Agent";
    const COLLECTION: &'static str = "agents";
    const RESULTS_KEY: &'static str = "agents";
}

impl Agent {
    /// Keys every agent request must carry.
    pub const REQUIRED: &'static [&'static str] = &["moxi_works_company_id"];

    /// Finds an agent by `agent_uuid`, or by `moxi_works_agent_id` when no
    /// UUID is given.
    ///
    /// ## Required attributes
    ///
    /// - `moxi_works_company_id`
    /// - `agent_uuid` or `moxi_works_agent_id`
    ///
    /// ## Errors
    ///
    /// Returns `ArgumentError` before any request when the identifiers or the
    /// company ID are missing, plus any transport error.
    pub fn find(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        let id = attributes
            .get_scalar("agent_uuid")
            .filter(|id| !id.is_empty())
            .or_else(|| {
                attributes
                    .get_scalar("moxi_works_agent_id")
                    .filter(|id| !id.is_empty())
            })
            .ok_or(ArgumentError::MissingEither {
                first: "agent_uuid",
                second: "moxi_works_agent_id",
            })?;
        attributes.require(Self::REQUIRED)?;

        send_one(client, RestMethod::Get, Some(&id), attributes)
    }

    /// Searches a company's agents.
    ///
    /// ## Required attributes
    ///
    /// - `moxi_works_company_id`
    ///
    /// ## Optional attributes
    ///
    /// - `updated_since` - Unix timestamp; the platform defaults to the last
    ///   seven days
    /// - `page_number`
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
    fn test_unknown_keys_are_dropped() {
        let envelope = json!({
            "moxi_works_agent_id": "a1",
            "name": "Jane Agent",
            "has_engage_access": true,
            "brand_new_server_field": {"nested": 1},
            "status": "ok"
        });
        let agent = Agent::from_envelope(envelope.as_object().cloned().unwrap()).unwrap();
        assert_eq!(agent.moxi_works_agent_id.as_deref(), Some("a1"));
        assert_eq!(agent.name.as_deref(), Some("Jane Agent"));
        assert_eq!(agent.has_engage_access, Some(true));

        let attrs = agent.to_attributes().unwrap();
        assert!(!attrs.contains_key("brand_new_server_field"));
        assert!(!attrs.contains_key("status"));
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn test_mistyped_scalars_are_coerced_or_dropped() {
        let envelope = json!({
            "moxi_works_agent_id": "a1",
            "gc_goal": 150000,
            "gci_goal": "250000",
            "buyer_commission_rate": "2.5",
            "has_engage_access": 1,
            "created_timestamp": "lots"
        });
        let agent = Agent::from_envelope(envelope.as_object().cloned().unwrap()).unwrap();
        assert_eq!(agent.gc_goal.as_deref(), Some("150000"));
        assert_eq!(agent.gci_goal, Some(250000));
        assert_eq!(agent.buyer_commission_rate, Some(2.5));
        assert_eq!(agent.has_engage_access, Some(true));
        assert_eq!(agent.created_timestamp, None);
    }

    #[test]
    fn test_non_object_is_decode_error() {
        let err = crate::resource::from_value::<Agent>(json!("a1")).unwrap_err();
        assert!(err.to_string().contains("unable to decode Agent"));
    }

    #[test]
    fn test_null_fields_stay_none() {
        let envelope = json!({"moxi_works_agent_id": "a1", "twitter": null});
        let agent = Agent::from_envelope(envelope.as_object().cloned().unwrap()).unwrap();
        assert_eq!(agent.twitter, None);
    }
}
