use actix_web::post;
use actix_web::web::{Data, Json};
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::generator::TextGenerator;
use super::manager;
use super::scraper::ProfileScraper;
use super::Profile;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerateFromUrlBody {
    #[serde(default, rename = "linkedinUrl")]
    pub linkedin_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileMessageBody {
    #[serde(flatten)]
    pub profile: Profile,
    pub message: String,
}

#[post("/messages/personalized-message")]
#[tracing::instrument(skip(generator))]
pub async fn generate_personalized_message(
    generator: Data<dyn TextGenerator>,
    body: Json<Profile>,
) -> Result<Json<MessageBody>, Error> {
    let profile = body.into_inner();

    let message = manager::generate_message(generator.get_ref(), &profile).await?;

    Ok(Json(MessageBody { message }))
}

#[post("/messages/personalized-message-url")]
#[tracing::instrument(skip(scraper, generator))]
pub async fn generate_personalized_message_from_url(
    scraper: Data<dyn ProfileScraper>,
    generator: Data<dyn TextGenerator>,
    body: Json<GenerateFromUrlBody>,
) -> Result<Json<ProfileMessageBody>, Error> {
    let body = body.into_inner();

    let (profile, message) = manager::generate_message_from_url(
        scraper.get_ref(),
        generator.get_ref(),
        body.linkedin_url,
    )
    .await?;

    Ok(Json(ProfileMessageBody { profile, message }))
}
