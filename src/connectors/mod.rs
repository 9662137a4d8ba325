//! Upstream LLM connectors
//!
//! Every provider sits behind [`CompletionConnector`] so the dispatcher never
//! depends on a concrete HTTP client, and tests can swap in a mock.
//!
//! ## Adding a provider
//!
//! 1. Configuration struct in `config.rs`
//! 2. Client implementing `CompletionConnector` in `{provider}.rs`
//! 3. A `Provider` variant and table rows in `services::dispatcher`

pub mod config;
pub mod errors;
pub mod gemini;
#[cfg(test)]
pub mod mock;
pub mod openrouter;

pub use config::{ConnectorConfig, GeminiConfig, OpenRouterConfig};
pub use errors::ConnectorError;
pub use gemini::GeminiClient;
pub use openrouter::OpenRouterClient;

use async_trait::async_trait;

#[async_trait]
pub trait CompletionConnector: Send + Sync {
    /// Provider name for logs and error reporting.
    fn name(&self) -> &'static str;

    /// Sends a single-turn prompt and returns the raw completion text.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ConnectorError>;
}

/// Shared client construction for providers.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ConnectorError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs.max(1)))
        .user_agent(format!("chatbridge/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))
}
