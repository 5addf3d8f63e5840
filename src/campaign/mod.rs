use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

/// A campaign document as it is persisted.
///
/// `leads_count` is derived from `account_ids` on every write and is never
/// taken from client input, see [`compute_leads_count`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub status: CampaignStatus,
    #[serde(rename = "linkedInUrls")]
    pub linkedin_urls: Vec<String>,
    pub account_ids: Vec<String>,
    pub leads_count: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Inactive,
    // only ever set by a soft delete, never accepted from a request
    Deleted,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Inactive => "INACTIVE",
            CampaignStatus::Deleted => "DELETED",
        }
    }

    /// Parses a status sent by a client. Only `ACTIVE` and `INACTIVE` are
    /// settable from outside.
    pub fn from_input(status: &str) -> Option<CampaignStatus> {
        match status {
            "ACTIVE" => Some(CampaignStatus::Active),
            "INACTIVE" => Some(CampaignStatus::Inactive),
            _ => None,
        }
    }
}

impl Default for CampaignStatus {
    fn default() -> CampaignStatus {
        CampaignStatus::Inactive
    }
}

/// The five client-settable fields of a campaign, used for both create and
/// update. Update is a full replace, so every field here overwrites the
/// stored value.
#[derive(Clone, Debug, Default)]
pub struct CampaignFields {
    pub name: String,
    pub description: String,
    pub status: Option<String>,
    pub linkedin_urls: Vec<String>,
    pub account_ids: Vec<String>,
}

pub fn compute_leads_count(account_ids: &[String]) -> i64 {
    account_ids.len() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leads_count_follows_account_ids() {
        assert_eq!(compute_leads_count(&[]), 0);
        assert_eq!(
            compute_leads_count(&["a1".to_string(), "a2".to_string(), "a1".to_string()]),
            3
        );
    }

    #[test]
    fn deleted_is_not_accepted_as_input() {
        assert_eq!(
            CampaignStatus::from_input("ACTIVE"),
            Some(CampaignStatus::Active)
        );
        assert_eq!(
            CampaignStatus::from_input("INACTIVE"),
            Some(CampaignStatus::Inactive)
        );
        assert_eq!(CampaignStatus::from_input("DELETED"), None);
        assert_eq!(CampaignStatus::from_input("active"), None);
    }

    #[test]
    fn status_serializes_in_upper_case() {
        assert_eq!(
            serde_json::to_string(&CampaignStatus::Deleted).unwrap(),
            "\"DELETED\""
        );
        assert_eq!(CampaignStatus::Inactive.as_str(), "INACTIVE");
    }
}
