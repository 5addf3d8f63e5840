use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Campaign, CampaignFields, CampaignId, CampaignStatus};

/// Request body shared by create and update. Anything not listed here,
/// including a client-sent `leadsCount`, is ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFieldsBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "linkedInUrls")]
    pub linkedin_urls: Option<Vec<String>>,
    #[serde(default)]
    pub account_ids: Option<Vec<String>>,
}

impl From<CampaignFieldsBody> for CampaignFields {
    fn from(body: CampaignFieldsBody) -> CampaignFields {
        CampaignFields {
            name: body.name.unwrap_or_default(),
            description: body.description.unwrap_or_default(),
            status: body.status,
            linkedin_urls: body.linkedin_urls.unwrap_or_default(),
            account_ids: body.account_ids.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBody {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub status: CampaignStatus,
    #[serde(rename = "linkedInUrls")]
    pub linkedin_urls: Vec<String>,
    pub account_ids: Vec<String>,
    pub leads_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            name: campaign.name,
            description: campaign.description,
            status: campaign.status,
            linkedin_urls: campaign.linkedin_urls,
            account_ids: campaign.account_ids,
            leads_count: campaign.leads_count,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignDeletedBody {
    pub message: String,
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: Data<dyn Database>) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns(db.get_ref()).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<dyn Database>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let campaign = manager::get_campaign_by_id(db.get_ref(), campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[post("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<dyn Database>,
    body: Json<CampaignFieldsBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let campaign = manager::create_campaign(db.get_ref(), body.into()).await?;

    Ok(HttpResponse::Created().json(CampaignBody::render(campaign)))
}

#[put("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: Data<dyn Database>,
    params: Path<CampaignId>,
    body: Json<CampaignFieldsBody>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let campaign = manager::update_campaign(db.get_ref(), campaign_id, body.into()).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[delete("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: Data<dyn Database>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignDeletedBody>, Error> {
    let campaign_id = params.into_inner();

    manager::delete_campaign(db.get_ref(), campaign_id).await?;

    Ok(Json(CampaignDeletedBody {
        message: "Campaign deleted".to_string(),
    }))
}
