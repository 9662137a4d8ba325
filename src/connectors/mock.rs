use super::{CompletionConnector, ConnectorError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Canned-response connector that records every `(model, prompt)` it receives.
pub struct MockCompletionConnector {
    name: &'static str,
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockCompletionConnector {
    pub fn replying(name: &'static str, reply: &str) -> Self {
        Self {
            name,
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionConnector for MockCompletionConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ConnectorError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        self.reply.clone().ok_or_else(|| ConnectorError::UpstreamStatus {
            status: 500,
            body: "mock failure".to_string(),
        })
    }
}
