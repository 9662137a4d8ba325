use super::config::GeminiConfig;
use super::errors::ConnectorError;
use super::{build_http_client, CompletionConnector};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument;

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

/// Keeps the key out of the URL, which reqwest echoes in its errors.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for `models/{model}:generateContent`.
pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, ConnectorError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            http_client: build_http_client(config.timeout_secs)?,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl CompletionConnector for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ConnectorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ConnectorError::NotConfigured(self.name().to_string()))?;

        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });

        let span = tracing::info_span!("gemini_generate_content", model = %model);
        let response = self
            .http_client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .instrument(span.clone())
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(parent: &span, status = status.as_u16(), "Gemini returned an error");
            return Err(ConnectorError::from_status(status, text));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .ok_or_else(|| ConnectorError::InvalidResponse("No candidates in response".to_string()))?;

        Ok(text)
    }
}
