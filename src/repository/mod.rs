//! Storage seam for the chat service.
//!
//! Route handlers and services only see `Arc<dyn ChatRepository>`. Production wires
//! [`PgRepository`]; tests and local demos can use [`MemoryRepository`].

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::db::stats::Totals;
use crate::models;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn fetch_user(&self, id: i32) -> Result<Option<models::User>, StoreError>;

    async fn fetch_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<models::User>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn insert_user(&self, user: models::NewUser) -> Result<models::User, StoreError>;

    async fn update_user_flags(
        &self,
        username: &str,
        flags: models::UserFlags,
    ) -> Result<Option<models::User>, StoreError>;

    async fn user_messages(&self, user_id: i32) -> Result<Vec<models::Message>, StoreError>;

    async fn session_messages(&self, session_id: &str)
        -> Result<Vec<models::Message>, StoreError>;

    /// Stores a prompt and its reply for a registered user and bumps the user's
    /// lifetime counter. Returns the stored reply.
    async fn record_user_exchange(
        &self,
        user_id: i32,
        prompt: models::NewMessage,
        reply: models::NewMessage,
    ) -> Result<models::Message, StoreError>;

    async fn fetch_anonymous_session(
        &self,
        session_id: &str,
    ) -> Result<Option<models::AnonymousSession>, StoreError>;

    async fn get_or_create_anonymous_session(
        &self,
        session_id: &str,
    ) -> Result<models::AnonymousSession, StoreError>;

    /// Increments the session counter if it is below `limit` and stores the
    /// exchange, all or nothing. `Ok(None)` means the limit was already reached
    /// and nothing was written.
    async fn record_anonymous_exchange(
        &self,
        session_id: &str,
        limit: i32,
        prompt: models::NewMessage,
        reply: models::NewMessage,
    ) -> Result<Option<models::Message>, StoreError>;

    async fn insert_user_session(
        &self,
        session: models::UserSession,
    ) -> Result<models::UserSession, StoreError>;

    async fn fetch_user_session(
        &self,
        token: &str,
    ) -> Result<Option<models::UserSession>, StoreError>;

    async fn delete_user_session(&self, token: &str) -> Result<(), StoreError>;

    async fn totals(&self) -> Result<Totals, StoreError>;
}
