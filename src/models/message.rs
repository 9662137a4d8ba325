use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown message role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Conversation owner. A message belongs to a registered user or to an
/// anonymous session, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    User(i32),
    Session(String),
}

impl Owner {
    /// Rebuilds the owner from the two nullable columns of a `messages` row.
    pub fn from_columns(user_id: Option<i32>, session_id: Option<String>) -> Option<Self> {
        match (user_id, session_id) {
            (Some(id), None) => Some(Owner::User(id)),
            (None, Some(token)) => Some(Owner::Session(token)),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        match self {
            Owner::User(id) => Some(*id),
            Owner::Session(_) => None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            Owner::User(_) => None,
            Owner::Session(token) => Some(token.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: i32,
    pub owner: Owner,
    pub content: String,
    pub model_id: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for Message {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let user_id: Option<i32> = row.try_get("user_id")?;
        let session_id: Option<String> = row.try_get("session_id")?;
        let owner =
            Owner::from_columns(user_id, session_id).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "user_id".to_string(),
                source: "message must have exactly one of user_id and session_id".into(),
            })?;

        let role: String = row.try_get("role")?;
        let role = role
            .parse::<Role>()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(err),
            })?;

        Ok(Message {
            id: row.try_get("id")?,
            owner,
            content: row.try_get("content")?,
            model_id: row.try_get("model_id")?,
            role,
            timestamp: row.try_get("timestamp")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub owner: Owner,
    pub content: String,
    pub model_id: String,
    pub role: Role,
}

impl NewMessage {
    pub fn prompt(owner: Owner, content: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            owner,
            content: content.into(),
            model_id: model_id.into(),
            role: Role::User,
        }
    }

    pub fn reply(owner: Owner, content: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            owner,
            content: content.into(),
            model_id: model_id.into(),
            role: Role::Assistant,
        }
    }
}
