use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod endpoints;
pub mod generator;
pub mod manager;
pub mod scraper;
pub use endpoints::*;

/// Returned in place of a generated message whenever the text generator
/// fails or comes back empty.
pub const FALLBACK_MESSAGE: &str = "Failed to generate content.";

/// Everything needed to write an outreach message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub summary: String,
}

/// A profile as recovered by a scraper, where any field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartialProfile {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
}

impl PartialProfile {
    /// Succeeds only if all five fields were recovered, otherwise hands the
    /// partial profile back.
    pub fn into_profile(self) -> Result<Profile, PartialProfile> {
        match self {
            PartialProfile {
                name: Some(name),
                job_title: Some(job_title),
                company: Some(company),
                location: Some(location),
                summary: Some(summary),
            } => Ok(Profile {
                name,
                job_title,
                company,
                location,
                summary,
            }),
            partial => Err(partial),
        }
    }
}

pub fn build_prompt(profile: &Profile) -> String {
    format!(
        "Generate a personalized cold outreach message to {}, a {} at {} located in {}. \
         Their summary is: {}. Focus on their experience and suggest a connection. \
         Keep it short and engaging.",
        profile.name, profile.job_title, profile.company, profile.location, profile.summary,
    )
}

fn linkedin_profile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://)?([A-Za-z0-9_]+\.)?linkedin\.com/in/[A-Za-z0-9_\-]+/?$")
            .expect("Invalid linkedin profile regex")
    })
}

/// Accepts `linkedin.com/in/<handle>` with an optional scheme, an optional
/// single subdomain and an optional trailing slash.
pub fn is_linkedin_profile_url(url: &str) -> bool {
    linkedin_profile_pattern().is_match(url)
}
