use tracing::{info, warn};

use crate::error::Error;

use super::generator::TextGenerator;
use super::scraper::ProfileScraper;
use super::{build_prompt, is_linkedin_profile_url, Profile, FALLBACK_MESSAGE};

/// Writes an outreach message for the profile. Generator failures and empty
/// answers turn into [`FALLBACK_MESSAGE`]; only a missing generator
/// configuration fails.
#[tracing::instrument(skip(generator))]
pub async fn generate_message(
    generator: &dyn TextGenerator,
    profile: &Profile,
) -> Result<String, Error> {
    let prompt = build_prompt(profile);

    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => {
            warn!("text generator returned no content");
            Ok(FALLBACK_MESSAGE.to_string())
        }
        Err(err @ Error::MissingConfiguration { .. }) => Err(err),
        Err(err) => {
            warn!("text generation failed: {}", err);
            Ok(FALLBACK_MESSAGE.to_string())
        }
    }
}

#[tracing::instrument(skip(scraper, generator))]
pub async fn generate_message_from_url(
    scraper: &dyn ProfileScraper,
    generator: &dyn TextGenerator,
    linkedin_url: Option<String>,
) -> Result<(Profile, String), Error> {
    let linkedin_url = linkedin_url
        .filter(|url| !url.is_empty())
        .ok_or(Error::LinkedInUrlIsMissing)?;

    if !is_linkedin_profile_url(&linkedin_url) {
        return Err(Error::LinkedInUrlIsInvalid { linkedin_url });
    }

    let profile = scraper
        .fetch(&linkedin_url)
        .await?
        .into_profile()
        .map_err(|partial| {
            info!("incomplete profile data: {:?}", partial);
            Error::IncompleteLinkedInProfile(partial)
        })?;

    let message = generate_message(generator, &profile).await?;

    Ok((profile, message))
}
