use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::RapidApiConfig;
use crate::error::Error;

use super::PartialProfile;

#[async_trait]
pub trait ProfileScraper: Send + Sync {
    async fn fetch(&self, profile_url: &str) -> Result<PartialProfile, Error>;
}

/// Looks up LinkedIn profiles through the RapidAPI "linkedin-data-api".
#[derive(Debug, Clone)]
pub struct RapidApiProfileScraper {
    client: reqwest::Client,
    api_key: Option<String>,
    host: String,
    base_url: String,
}

impl RapidApiProfileScraper {
    pub fn new(config: &RapidApiConfig) -> RapidApiProfileScraper {
        RapidApiProfileScraper {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            host: config.host.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkedInProfileData {
    first_name: Option<String>,
    last_name: Option<String>,
    headline: Option<String>,
    summary: Option<String>,
    geo: Option<Geo>,
    position: Option<Vec<Position>>,
}

#[derive(Debug, Deserialize)]
struct Geo {
    full: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Position {
    company_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl LinkedInProfileData {
    fn into_partial_profile(self) -> PartialProfile {
        let name = match (non_empty(self.first_name), non_empty(self.last_name)) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        };

        PartialProfile {
            name,
            job_title: non_empty(self.headline),
            company: self
                .position
                .and_then(|positions| positions.into_iter().next())
                .and_then(|position| non_empty(position.company_name)),
            location: self.geo.and_then(|geo| non_empty(geo.full)),
            summary: non_empty(self.summary),
        }
    }
}

#[async_trait]
impl ProfileScraper for RapidApiProfileScraper {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, profile_url: &str) -> Result<PartialProfile, Error> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingConfiguration {
            name: "RAPID_API_KEY",
        })?;

        let url = format!("{}/get-profile-data-by-url", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("url", profile_url)])
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await?;

        // the service answers unknown or private profiles with an error
        // status, which leaves every field unrecovered
        if !response.status().is_success() {
            warn!(status = %response.status(), "profile lookup was rejected");
            return Ok(PartialProfile::default());
        }

        let data: LinkedInProfileData = response.json().await?;

        Ok(data.into_partial_profile())
    }
}
