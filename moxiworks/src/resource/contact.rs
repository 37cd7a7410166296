//! Contacts.

use serde::{Deserialize, Serialize};

use super::{Resource, SearchPage, identifier, lenient, send_one, send_search};
use crate::attributes::Attributes;
use crate::client::PlatformClient;
use crate::error::PlatformError;
use crate::method::RestMethod;

/// A contact in an agent's database, keyed by your system's
/// `partner_contact_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Platform ID of the agent who owns the contact.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_agent_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub agent_uuid: Option<String>,
    /// Your system's ID for the contact.
    #[serde(deserialize_with = "lenient::string")]
    pub partner_contact_id: Option<String>,
    /// Platform ID of the contact.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_contact_id: Option<String>,
    /// Full name, as shown to the agent.
    #[serde(deserialize_with = "lenient::string")]
    pub contact_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub middle_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub suffix: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub label_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub primary_email_address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub secondary_email_address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub primary_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub secondary_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_street_address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_city: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_zip: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub home_country: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub occupation: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub birthday: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_deleted: Option<bool>,
    /// Unix timestamp of the last change.
    #[serde(deserialize_with = "lenient::int")]
    pub last_updated: Option<i64>,
}

impl Resource for Contact {
    const NAME: &'static str = "Contact";
    const COLLECTION: &'static str = "contacts";
    const RESULTS_KEY: &'static str = "contacts";
}

impl Contact {
    /// Keys a create, find or update request must carry.
    pub const REQUIRED: &'static [&'static str] = &["moxi_works_agent_id", "partner_contact_id"];
    /// Keys a search request must carry.
    pub const SEARCH_REQUIRED: &'static [&'static str] = &["moxi_works_agent_id"];

    /// Creates a contact.
    pub fn create(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        send_one(client, RestMethod::Post, None, attributes)
    }

    /// Finds a contact by `partner_contact_id`.
    pub fn find(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        let id = identifier(attributes, "partner_contact_id")?;
        send_one(client, RestMethod::Get, Some(&id), attributes)
    }

    /// Updates a contact identified by `partner_contact_id`.
    pub fn update(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        let id = identifier(attributes, "partner_contact_id")?;
        send_one(client, RestMethod::Put, Some(&id), attributes)
    }

    /// Searches an agent's contacts.
    ///
    /// ## Optional attributes
    ///
    /// - `contact_name`, `email_address`, `phone_number` - narrow the search
    /// - `updated_since` - Unix timestamp
    /// - `page_number`
    pub fn search(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<SearchPage<Self>>, PlatformError> {
        attributes.require(Self::SEARCH_REQUIRED)?;
        send_search(client, attributes)
    }

    /// Sends this contact's fields as an update.
    pub fn save(&self, client: &PlatformClient) -> Result<Option<Self>, PlatformError> {
        Self::update(client, &self.to_attributes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_page_of_contacts() {
        let envelope = json!({
            "contacts": [
                {"partner_contact_id": "p-1", "contact_name": "First"},
                {"partner_contact_id": "p-2", "is_deleted": true}
            ],
            "page_number": 2,
            "total_pages": 3
        });
        let page: SearchPage<Contact> =
            SearchPage::from_envelope(envelope.as_object().cloned().unwrap()).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.entries()[1].is_deleted, Some(true));
        assert!(page.has_next_page());
    }

    #[test]
    fn test_missing_partner_contact_id_is_reported() {
        let attrs = Attributes::new().with("moxi_works_agent_id", "a1");
        let err = attrs.require(Contact::REQUIRED).unwrap_err();
        assert_eq!(err.to_string(), "partner_contact_id required");
    }
}
