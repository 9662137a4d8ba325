use super::config::OpenRouterConfig;
use super::errors::ConnectorError;
use super::{build_http_client, CompletionConnector};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::Instrument;

/// Calls the OpenAI-compatible chat completions endpoint of OpenRouter.
pub struct OpenRouterClient {
    endpoint: String,
    api_key: Option<String>,
    app_title: Option<String>,
    http_client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(config: &OpenRouterConfig) -> Result<Self, ConnectorError> {
        Ok(Self {
            endpoint: format!(
                "{}/api/v1/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            app_title: config.app_title.clone(),
            http_client: build_http_client(config.timeout_secs)?,
        })
    }
}

#[async_trait]
impl CompletionConnector for OpenRouterClient {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ConnectorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ConnectorError::NotConfigured(self.name().to_string()))?;

        let body = serde_json::json!({
            "model": model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body);
        if let Some(title) = &self.app_title {
            request = request.header("X-Title", title);
        }

        let span = tracing::info_span!("openrouter_chat_completion", model = %model);
        let response = request.send().instrument(span.clone()).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(parent: &span, status = status.as_u16(), "OpenRouter returned an error");
            return Err(ConnectorError::from_status(status, text));
        }

        let json: serde_json::Value = response.json().await?;

        // OpenRouter reports some provider failures inside a 200 body
        if let Some(message) = json["error"]["message"].as_str() {
            return Err(ConnectorError::InvalidResponse(message.to_string()));
        }

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ConnectorError::InvalidResponse("No content in response".to_string()))
    }
}
