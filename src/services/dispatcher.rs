use crate::connectors::{
    CompletionConnector, ConnectorConfig, ConnectorError, GeminiClient, OpenRouterClient,
};
use serde::Serialize;
use std::sync::Arc;

/// Identifiers with this prefix always go to OpenRouter.
pub const OPENROUTER_PREFIX: &str = "openrouter/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    OpenRouter,
}

/// One row of the model table: what the client picks and what the provider receives.
#[derive(Debug, Clone, Copy)]
pub struct ModelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub provider: Provider,
    pub upstream: &'static str,
}

pub const MODELS: &[ModelSpec] = &[
    ModelSpec {
        id: "gemini-free",
        name: "Gemini 1.5 Flash",
        description: "Fast general-purpose model from Google",
        provider: Provider::Gemini,
        upstream: "gemini-1.5-flash",
    },
    ModelSpec {
        id: "gemini-pro",
        name: "Gemini Pro",
        description: "Google Gemini Pro",
        provider: Provider::Gemini,
        upstream: "gemini-pro",
    },
    ModelSpec {
        id: "gemini-1.5-pro",
        name: "Gemini 1.5 Pro",
        description: "Google Gemini 1.5 Pro with a long context window",
        provider: Provider::Gemini,
        upstream: "gemini-1.5-pro",
    },
    ModelSpec {
        id: "openrouter/deepseek-r1-distill-llama-70b",
        name: "DeepSeek R1 Distill Llama 70B",
        description: "Reasoning model distilled onto Llama 70B, served by OpenRouter",
        provider: Provider::OpenRouter,
        upstream: "deepseek/deepseek-r1-distill-llama-70b",
    },
    ModelSpec {
        id: "openrouter/mistral-7b",
        name: "Mistral 7B Instruct",
        description: "Small instruction-tuned model, served by OpenRouter",
        provider: Provider::OpenRouter,
        upstream: "mistralai/mistral-7b-instruct",
    },
    ModelSpec {
        id: "openrouter/llama-3-8b",
        name: "Llama 3 8B Instruct",
        description: "Meta Llama 3 8B, served by OpenRouter",
        provider: Provider::OpenRouter,
        upstream: "meta-llama/llama-3-8b-instruct",
    },
];

pub fn lookup(model_id: &str) -> Option<&'static ModelSpec> {
    MODELS.iter().find(|spec| spec.id == model_id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub provider: Provider,
    pub upstream_model: String,
}

/// Picks a provider for a model identifier and normalises the completion.
pub struct ModelDispatcher {
    gemini: Arc<dyn CompletionConnector>,
    openrouter: Arc<dyn CompletionConnector>,
    default_gemini_model: String,
}

impl ModelDispatcher {
    pub fn new(
        gemini: Arc<dyn CompletionConnector>,
        openrouter: Arc<dyn CompletionConnector>,
        default_gemini_model: impl Into<String>,
    ) -> Self {
        Self {
            gemini,
            openrouter,
            default_gemini_model: default_gemini_model.into(),
        }
    }

    pub fn from_config(config: &ConnectorConfig) -> Result<Self, ConnectorError> {
        if config.gemini.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; Gemini models will fail");
        }
        if config.openrouter.api_key.is_none() {
            tracing::warn!("OPENROUTER_API_KEY is not set; OpenRouter models will fail");
        }

        Ok(Self::new(
            Arc::new(GeminiClient::new(&config.gemini)?),
            Arc::new(OpenRouterClient::new(&config.openrouter)?),
            config.gemini.default_model.clone(),
        ))
    }

    /// Table hit first, then the `openrouter/` prefix, otherwise the default Gemini model.
    pub fn resolve(&self, model_id: &str) -> Route {
        if let Some(spec) = lookup(model_id) {
            return Route {
                provider: spec.provider,
                upstream_model: spec.upstream.to_string(),
            };
        }

        match model_id.strip_prefix(OPENROUTER_PREFIX) {
            Some(upstream) => Route {
                provider: Provider::OpenRouter,
                upstream_model: upstream.to_string(),
            },
            None => Route {
                provider: Provider::Gemini,
                upstream_model: self.default_gemini_model.clone(),
            },
        }
    }

    fn connector(&self, provider: Provider) -> &dyn CompletionConnector {
        match provider {
            Provider::Gemini => self.gemini.as_ref(),
            Provider::OpenRouter => self.openrouter.as_ref(),
        }
    }

    #[tracing::instrument(name = "Dispatch prompt.", skip(self, prompt))]
    pub async fn generate(&self, model_id: &str, prompt: &str) -> Result<String, ConnectorError> {
        let route = self.resolve(model_id);
        let connector = self.connector(route.provider);
        tracing::debug!(
            provider = connector.name(),
            upstream_model = %route.upstream_model,
            "Routing prompt"
        );

        let text = connector.complete(&route.upstream_model, prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ConnectorError::InvalidResponse(format!(
                "{} returned an empty completion",
                connector.name()
            )));
        }

        Ok(text.to_string())
    }
}
