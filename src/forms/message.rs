use serde::Deserialize;
use serde_valid::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 32000)]
    pub content: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 128)]
    pub model_id: String,
}

impl MessageForm {
    /// Length rules plus a non-blank prompt.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| errors.to_string())?;
        if self.content.trim().is_empty() {
            return Err("content must not be blank".to_string());
        }
        Ok(())
    }
}

// prompt text stays out of logs and instrument spans
impl std::fmt::Debug for MessageForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageForm")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}
