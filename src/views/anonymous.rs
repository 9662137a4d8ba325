use crate::models;
use crate::services::QuotaGuard;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousSession {
    pub session_id: String,
    pub message_count: i32,
    pub message_limit: i32,
    pub messages_remaining: i32,
}

impl AnonymousSession {
    pub fn new(session: models::AnonymousSession, quota: QuotaGuard) -> Self {
        Self {
            messages_remaining: quota.remaining(&session),
            message_limit: quota.limit(),
            message_count: session.message_count,
            session_id: session.session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn serializes_quota_fields_at_top_level() {
        let session = models::AnonymousSession {
            id: 1,
            session_id: "abc".to_string(),
            message_count: 2,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(AnonymousSession::new(session, QuotaGuard::new(3))).unwrap();

        assert_eq!(value["sessionId"], "abc");
        assert_eq!(value["messageCount"], 2);
        assert_eq!(value["messageLimit"], 3);
        assert_eq!(value["messagesRemaining"], 1);
    }
}
