use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public shape of an account. The password hash and billing ids stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub is_pro: bool,
    pub is_admin: bool,
    pub message_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&models::User> for User {
    fn from(user: &models::User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_pro: user.is_pro,
            is_admin: user.is_admin,
            message_count: user.message_count,
            created_at: user.created_at,
        }
    }
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        User::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let user = models::User {
            id: 1,
            username: "ada".to_string(),
            password: "$2b$04$secret".to_string(),
            is_pro: true,
            is_admin: false,
            message_count: 3,
            stripe_customer_id: Some("cus_1".to_string()),
            stripe_subscription_id: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(User::from(user)).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("stripeCustomerId").is_none());
        assert_eq!(value["isPro"], true);
        assert_eq!(value["messageCount"], 3);
    }
}
