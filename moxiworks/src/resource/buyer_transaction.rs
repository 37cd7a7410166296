//! Buyer transactions.

use serde::{Deserialize, Serialize};

use super::{Resource, SearchPage, identifier, lenient, send_one, send_search};
use crate::attributes::Attributes;
use crate::client::PlatformClient;
use crate::error::PlatformError;
use crate::method::RestMethod;

/// A transaction in which an agent represents a buyer.
///
/// Newly created transactions start in stage 3 (active). Set
/// `promote_transaction` on an update to advance one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyerTransaction {
    /// Platform ID of the agent.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_agent_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub agent_uuid: Option<String>,
    /// Platform ID of this transaction.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_transaction_id: Option<String>,
    /// Platform ID of the contact.
    #[serde(deserialize_with = "lenient::string")]
    pub moxi_works_contact_id: Option<String>,
    /// Your system's ID for the contact.
    #[serde(deserialize_with = "lenient::string")]
    pub partner_contact_id: Option<String>,
    /// Short, human readable title shown to the agent.
    #[serde(deserialize_with = "lenient::string")]
    pub transaction_name: Option<String>,
    /// Human readable notes shown to the agent.
    #[serde(deserialize_with = "lenient::string")]
    pub notes: Option<String>,
    /// Stage number, 1 through 5.
    #[serde(deserialize_with = "lenient::int")]
    pub stage: Option<i64>,
    /// Human readable stage.
    #[serde(deserialize_with = "lenient::string")]
    pub stage_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub min_sqft: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub max_sqft: Option<i64>,
    /// Living area.
    #[serde(deserialize_with = "lenient::int")]
    pub sqft: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub min_beds: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub max_beds: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub beds: Option<i64>,
    #[serde(deserialize_with = "lenient::float")]
    pub min_baths: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    pub max_baths: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    pub baths: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub area_of_interest: Option<String>,
    /// Whether the property is listed on an MLS.
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_mls_transaction: Option<bool>,
    /// Only meaningful when `is_mls_transaction` is true.
    #[serde(deserialize_with = "lenient::string")]
    pub mls_number: Option<String>,
    /// Unix timestamp of when discussions with the client began.
    #[serde(deserialize_with = "lenient::int")]
    pub start_timestamp: Option<i64>,
    /// Mutually exclusive with `commission_flat_fee`.
    #[serde(deserialize_with = "lenient::float")]
    pub commission_percentage: Option<f64>,
    /// Mutually exclusive with `commission_percentage`.
    #[serde(deserialize_with = "lenient::int")]
    pub commission_flat_fee: Option<i64>,
    #[serde(deserialize_with = "lenient::float")]
    pub sales_volume_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient::int")]
    pub sales_volume_flat_fee: Option<i64>,
    /// Target price; mutually exclusive with `min_price` / `max_price`.
    #[serde(deserialize_with = "lenient::int")]
    pub target_price: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub min_price: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub max_price: Option<i64>,
    /// Set only once the transaction is complete.
    #[serde(deserialize_with = "lenient::int")]
    pub closing_price: Option<i64>,
    /// Unix timestamp; set only once the transaction is complete.
    #[serde(deserialize_with = "lenient::int")]
    pub closing_timestamp: Option<i64>,
    /// Update-only: advance the transaction to its next stage.
    #[serde(deserialize_with = "lenient::boolean")]
    pub promote_transaction: Option<bool>,
    /// Unix timestamp of the last stage change.
    #[serde(deserialize_with = "lenient::int")]
    pub state_changed_at: Option<i64>,
}

impl Resource for BuyerTransaction {
    const NAME: &'static str = "BuyerTransaction";
    const COLLECTION: &'static str = "buyer_transactions";
    const RESULTS_KEY: &'static str = "transactions";
}

impl BuyerTransaction {
    /// Keys a create or search request must carry.
    pub const REQUIRED: &'static [&'static str] = &["moxi_works_agent_id"];
    /// Keys a find or update request must carry.
    pub const MEMBER_REQUIRED: &'static [&'static str] =
        &["moxi_works_agent_id", "moxi_works_transaction_id"];

    /// Creates a buyer transaction.
    ///
    /// ## Required attributes
    ///
    /// - `moxi_works_agent_id`
    ///
    /// Everything else is optional: `moxi_works_contact_id` or
    /// `partner_contact_id`, `transaction_name`, `notes`, address fields,
    /// size and price ranges, commission terms, `mls_number`.
    pub fn create(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        send_one(client, RestMethod::Post, None, attributes)
    }

    /// Finds a buyer transaction by `moxi_works_transaction_id`.
    pub fn find(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::MEMBER_REQUIRED)?;
        let id = identifier(attributes, "moxi_works_transaction_id")?;
        send_one(client, RestMethod::Get, Some(&id), attributes)
    }

    /// Updates a buyer transaction identified by `moxi_works_transaction_id`.
    pub fn update(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<Self>, PlatformError> {
        attributes.require(Self::MEMBER_REQUIRED)?;
        let id = identifier(attributes, "moxi_works_transaction_id")?;
        send_one(client, RestMethod::Put, Some(&id), attributes)
    }

    /// Searches an agent's buyer transactions.
    ///
    /// ## Optional attributes
    ///
    /// - `moxi_works_contact_id` or `partner_contact_id` - one contact only
    /// - `page_number`
    pub fn search(
        client: &PlatformClient,
        attributes: &Attributes,
    ) -> Result<Option<SearchPage<Self>>, PlatformError> {
        attributes.require(Self::REQUIRED)?;
        send_search(client, attributes)
    }

    /// Sends this transaction's fields as an update.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let mut transaction = BuyerTransaction::find(&client, &attrs)?.unwrap();
    /// transaction.city = Some("Cityville".to_string());
    /// transaction.save(&client)?;
    /// ```
    pub fn save(&self, client: &PlatformClient) -> Result<Option<Self>, PlatformError> {
        Self::update(client, &self.to_attributes()?)
    }
}
