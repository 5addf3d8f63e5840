use mongodb::{bson, Collection};
use tracing::info;

use crate::campaign::db::{self as campaign_db, CampaignStore, MemoryCampaignStore};
use crate::campaign::Campaign;
use crate::error::Error;

pub type MongoCampaignStore = Collection<Campaign>;

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    campaigns: MongoCampaignStore,
}

impl MongoDatabase {
    pub async fn initialize(db: mongodb::Database) -> Result<MongoDatabase, Error> {
        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;
        info!("connected to db: {}", db.name());

        campaign_db::initialize(&db).await?;

        Ok(MongoDatabase {
            campaigns: db.collection("campaigns"),
        })
    }
}

impl Database for MongoDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    campaigns: MemoryCampaignStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

impl Database for MemoryDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
