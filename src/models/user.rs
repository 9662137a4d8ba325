use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// bcrypt hash
    pub password: String,
    pub is_pro: bool,
    pub is_admin: bool,
    pub message_count: i32,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Flag changes applied by the console. `None` leaves the column untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFlags {
    pub is_pro: Option<bool>,
    pub is_admin: Option<bool>,
}
