use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnonymousSession {
    pub id: i32,
    pub session_id: String,
    pub message_count: i32,
    pub created_at: DateTime<Utc>,
}
