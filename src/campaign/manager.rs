use chrono::{DateTime, SubsecRound, Utc};

use crate::database::Database;
use crate::error::Error;

use super::{compute_leads_count, Campaign, CampaignFields, CampaignId, CampaignStatus};

/// Resolves the requested status. Absent or empty means `INACTIVE`.
pub fn parse_status(status: Option<&str>) -> Result<CampaignStatus, Error> {
    match status {
        None | Some("") => Ok(CampaignStatus::default()),
        Some(status) => CampaignStatus::from_input(status).ok_or(Error::InvalidCampaignStatus {
            status: status.to_string(),
        }),
    }
}

/// Current time at the millisecond precision bson datetimes are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

struct ValidFields {
    name: String,
    description: String,
    status: CampaignStatus,
    linkedin_urls: Vec<String>,
    account_ids: Vec<String>,
    leads_count: i64,
}

fn validate_fields(fields: CampaignFields) -> Result<ValidFields, Error> {
    let status = parse_status(fields.status.as_deref())?;

    let name = fields.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::CampaignFieldIsEmpty { field: "name" });
    }
    if fields.description.trim().is_empty() {
        return Err(Error::CampaignFieldIsEmpty {
            field: "description",
        });
    }

    Ok(ValidFields {
        name,
        description: fields.description,
        status,
        leads_count: compute_leads_count(&fields.account_ids),
        linkedin_urls: fields.linkedin_urls,
        account_ids: fields.account_ids,
    })
}

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, fields: CampaignFields) -> Result<Campaign, Error> {
    let fields = validate_fields(fields)?;

    let timestamp = now();
    let campaign = Campaign {
        id: CampaignId::new(),
        name: fields.name,
        description: fields.description,
        status: fields.status,
        linkedin_urls: fields.linkedin_urls,
        account_ids: fields.account_ids,
        leads_count: fields.leads_count,
        created_at: timestamp,
        updated_at: timestamp,
    };

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignDoesNotExist { campaign_id })?;

    Ok(campaign)
}

/// Replaces every client-settable field of a live campaign. A soft-deleted
/// campaign is reported as missing rather than brought back.
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: &dyn Database,
    campaign_id: CampaignId,
    fields: CampaignFields,
) -> Result<Campaign, Error> {
    let fields = validate_fields(fields)?;
    let existing = get_campaign_by_id(db, campaign_id).await?;

    let campaign = Campaign {
        id: existing.id,
        name: fields.name,
        description: fields.description,
        status: fields.status,
        linkedin_urls: fields.linkedin_urls,
        account_ids: fields.account_ids,
        leads_count: fields.leads_count,
        created_at: existing.created_at,
        updated_at: now(),
    };

    db.campaigns().update_campaign(campaign).await
}

/// Soft delete. Deleting an already deleted campaign is reported as missing.
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: &dyn Database, campaign_id: CampaignId) -> Result<(), Error> {
    db.campaigns().delete_campaign(campaign_id).await
}
