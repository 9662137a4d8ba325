use serde::{Deserialize, Serialize};

/// Configuration for upstream LLM connectors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

/// Google Gemini (Generative Language API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API root, e.g. https://generativelanguage.googleapis.com
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Upstream model used for identifiers missing from the model table
    pub default_model: String,
    /// From env: GEMINI_API_KEY
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
            default_model: "gemini-1.5-pro".to_string(),
            api_key: None,
        }
    }
}

/// OpenRouter chat completions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API root, e.g. https://openrouter.ai
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Sent as `X-Title` so requests are attributed in the OpenRouter dashboard
    #[serde(default)]
    pub app_title: Option<String>,
    /// From env: OPENROUTER_API_KEY
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai".to_string(),
            timeout_secs: 60,
            app_title: Some("chatbridge".to_string()),
            api_key: None,
        }
    }
}
