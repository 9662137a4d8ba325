use super::{ChatRepository, StoreError};
use crate::db;
use crate::db::stats::Totals;
use crate::models;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn conflict_or_database(err: sqlx::Error, what: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(what.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl ChatRepository for PgRepository {
    async fn fetch_user(&self, id: i32) -> Result<Option<models::User>, StoreError> {
        Ok(db::user::fetch(&self.pool, id).await?)
    }

    async fn fetch_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<models::User>, StoreError> {
        Ok(db::user::fetch_by_username(&self.pool, username).await?)
    }

    async fn insert_user(&self, user: models::NewUser) -> Result<models::User, StoreError> {
        db::user::insert(&self.pool, &user)
            .await
            .map_err(|err| conflict_or_database(err, "username"))
    }

    async fn update_user_flags(
        &self,
        username: &str,
        flags: models::UserFlags,
    ) -> Result<Option<models::User>, StoreError> {
        Ok(db::user::update_flags(&self.pool, username, flags).await?)
    }

    async fn user_messages(&self, user_id: i32) -> Result<Vec<models::Message>, StoreError> {
        Ok(db::message::fetch_by_user(&self.pool, user_id).await?)
    }

    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<models::Message>, StoreError> {
        Ok(db::message::fetch_by_session(&self.pool, session_id).await?)
    }

    async fn record_user_exchange(
        &self,
        user_id: i32,
        prompt: models::NewMessage,
        reply: models::NewMessage,
    ) -> Result<models::Message, StoreError> {
        let mut tx = self.pool.begin().await?;
        db::message::insert(&mut *tx, &prompt).await?;
        let reply = db::message::insert(&mut *tx, &reply).await?;
        db::user::increment_message_count(&mut *tx, user_id).await?;
        tx.commit().await?;

        Ok(reply)
    }

    async fn fetch_anonymous_session(
        &self,
        session_id: &str,
    ) -> Result<Option<models::AnonymousSession>, StoreError> {
        Ok(db::anonymous_session::fetch(&self.pool, session_id).await?)
    }

    async fn get_or_create_anonymous_session(
        &self,
        session_id: &str,
    ) -> Result<models::AnonymousSession, StoreError> {
        Ok(db::anonymous_session::upsert(&self.pool, session_id).await?)
    }

    async fn record_anonymous_exchange(
        &self,
        session_id: &str,
        limit: i32,
        prompt: models::NewMessage,
        reply: models::NewMessage,
    ) -> Result<Option<models::Message>, StoreError> {
        let mut tx = self.pool.begin().await?;
        // the row lock taken here serialises concurrent sends from one session
        let count = db::anonymous_session::increment_below(&mut *tx, session_id, limit).await?;
        if count.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        db::message::insert(&mut *tx, &prompt).await?;
        let reply = db::message::insert(&mut *tx, &reply).await?;
        tx.commit().await?;

        Ok(Some(reply))
    }

    async fn insert_user_session(
        &self,
        session: models::UserSession,
    ) -> Result<models::UserSession, StoreError> {
        db::user_session::insert(&self.pool, &session)
            .await
            .map_err(|err| conflict_or_database(err, "session token"))
    }

    async fn fetch_user_session(
        &self,
        token: &str,
    ) -> Result<Option<models::UserSession>, StoreError> {
        Ok(db::user_session::fetch(&self.pool, token).await?)
    }

    async fn delete_user_session(&self, token: &str) -> Result<(), StoreError> {
        db::user_session::delete(&self.pool, token).await?;
        Ok(())
    }

    async fn totals(&self) -> Result<Totals, StoreError> {
        Ok(db::stats::totals(&self.pool).await?)
    }
}
