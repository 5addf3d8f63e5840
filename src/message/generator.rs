use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::GeminiConfig;
use crate::error::Error;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produces text for the prompt. An empty string means the service
    /// answered without any content.
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// Calls the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiTextGenerator {
    pub fn new(config: &GeminiConfig) -> GeminiTextGenerator {
        GeminiTextGenerator {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    #[tracing::instrument(skip(self))]
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingConfiguration {
            name: "GEMINI_API_KEY",
        })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response: GenerateContentResponse = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.into_text().unwrap_or_default())
    }
}
