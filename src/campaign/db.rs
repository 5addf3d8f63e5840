use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;
use tokio::sync::RwLock;

use crate::database::MongoCampaignStore;
use crate::error::Error;

use super::{Campaign, CampaignId, CampaignStatus};

const CAMPAIGNS: &str = "campaigns";

/// Persistence for campaigns. Soft-deleted campaigns are invisible through
/// every method: they are not listed, not fetched and not updatable.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error>;

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    /// Overwrites the mutable fields of a live campaign and returns it.
    async fn update_campaign(&self, campaign: Campaign) -> Result<Campaign, Error>;

    /// Flips a live campaign to [`CampaignStatus::Deleted`].
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<(), Error>;
}

pub async fn initialize(db: &mongodb::Database) -> Result<(), Error> {
    db.run_command(
        bson::doc! {
            "createIndexes": CAMPAIGNS,
            "indexes": [
                { "key": { "status": 1 }, "name": "by_status" },
            ]
        },
        None,
    )
    .await?;

    Ok(())
}

fn live_campaign_filter(campaign_id: CampaignId) -> bson::Document {
    bson::doc! {
        "_id": campaign_id,
        "status": { "$ne": CampaignStatus::Deleted.as_str() },
    }
}

#[async_trait]
impl CampaignStore for MongoCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.insert_one(campaign, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let campaigns: Vec<Campaign> = self
            .find(
                bson::doc! { "status": { "$ne": CampaignStatus::Deleted.as_str() } },
                None,
            )
            .await?
            .try_collect()
            .await?;

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign: Option<Campaign> =
            self.find_one(live_campaign_filter(campaign_id), None).await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(&self, campaign: Campaign) -> Result<Campaign, Error> {
        let new_linkedin_urls = bson::to_bson(&campaign.linkedin_urls)?;
        let new_account_ids = bson::to_bson(&campaign.account_ids)?;
        let new_updated_at = bson::DateTime::from_chrono(campaign.updated_at);

        let result = self
            .update_one(
                live_campaign_filter(campaign.id),
                bson::doc! { "$set": {
                    "name": campaign.name.as_str(),
                    "description": campaign.description.as_str(),
                    "status": campaign.status.as_str(),
                    "linkedInUrls": new_linkedin_urls,
                    "accountIds": new_account_ids,
                    "leadsCount": campaign.leads_count,
                    "updatedAt": new_updated_at,
                } },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::CampaignDoesNotExist {
                campaign_id: campaign.id,
            });
        }

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<(), Error> {
        let now = bson::DateTime::now();

        let result = self
            .update_one(
                live_campaign_filter(campaign_id),
                bson::doc! { "$set": {
                    "status": CampaignStatus::Deleted.as_str(),
                    "updatedAt": now,
                } },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::CampaignDoesNotExist { campaign_id });
        }

        Ok(())
    }
}

/// Keeps campaigns in insertion order in process memory. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryCampaignStore {
    campaigns: RwLock<Vec<Campaign>>,
}

impl MemoryCampaignStore {
    pub fn new() -> MemoryCampaignStore {
        MemoryCampaignStore::default()
    }
}

fn is_live(campaign: &Campaign) -> bool {
    campaign.status != CampaignStatus::Deleted
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.campaigns.write().await.push(campaign.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let campaigns = self
            .campaigns
            .read()
            .await
            .iter()
            .filter(|campaign| is_live(campaign))
            .cloned()
            .collect();

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign = self
            .campaigns
            .read()
            .await
            .iter()
            .find(|campaign| campaign.id == campaign_id && is_live(campaign))
            .cloned();

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(&self, campaign: Campaign) -> Result<Campaign, Error> {
        let mut campaigns = self.campaigns.write().await;
        let stored = campaigns
            .iter_mut()
            .find(|stored| stored.id == campaign.id && is_live(stored))
            .ok_or(Error::CampaignDoesNotExist {
                campaign_id: campaign.id,
            })?;

        stored.name = campaign.name.clone();
        stored.description = campaign.description.clone();
        stored.status = campaign.status;
        stored.linkedin_urls = campaign.linkedin_urls.clone();
        stored.account_ids = campaign.account_ids.clone();
        stored.leads_count = campaign.leads_count;
        stored.updated_at = campaign.updated_at;

        Ok(stored.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<(), Error> {
        let mut campaigns = self.campaigns.write().await;
        let stored = campaigns
            .iter_mut()
            .find(|stored| stored.id == campaign_id && is_live(stored))
            .ok_or(Error::CampaignDoesNotExist { campaign_id })?;

        stored.status = CampaignStatus::Deleted;
        stored.updated_at = chrono::Utc::now();

        Ok(())
    }
}
