use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i32,
    pub user_id: Option<i32>,
    pub session_id: Option<String>,
    pub content: String,
    pub model_id: String,
    pub role: models::Role,
    pub timestamp: DateTime<Utc>,
}

impl From<models::Message> for Message {
    fn from(message: models::Message) -> Self {
        Self {
            id: message.id,
            user_id: message.owner.user_id(),
            session_id: message.owner.session_id().map(str::to_string),
            content: message.content,
            model_id: message.model_id,
            role: message.role,
            timestamp: message.timestamp,
        }
    }
}
