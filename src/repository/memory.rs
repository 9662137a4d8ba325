use super::{ChatRepository, StoreError};
use crate::db::stats::Totals;
use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store with the same semantics as [`super::PgRepository`].
/// Every exchange is applied under one write lock, so the anonymous quota
/// check-and-increment is atomic here as well.
#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: Vec<models::User>,
    messages: Vec<models::Message>,
    anonymous_sessions: HashMap<String, models::AnonymousSession>,
    user_sessions: HashMap<String, models::UserSession>,
    next_user_id: i32,
    next_message_id: i32,
    next_session_id: i32,
}

impl State {
    fn push_message(&mut self, message: models::NewMessage) -> models::Message {
        self.next_message_id += 1;
        let stored = models::Message {
            id: self.next_message_id,
            owner: message.owner,
            content: message.content,
            model_id: message.model_id,
            role: message.role,
            timestamp: Utc::now(),
        };
        self.messages.push(stored.clone());
        stored
    }

    fn messages_where<F>(&self, filter: F) -> Vec<models::Message>
    where
        F: Fn(&models::Owner) -> bool,
    {
        let mut messages: Vec<models::Message> = self
            .messages
            .iter()
            .filter(|message| filter(&message.owner))
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        messages
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for MemoryRepository {
    async fn fetch_user(&self, id: i32) -> Result<Option<models::User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|user| user.id == id).cloned())
    }

    async fn fetch_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<models::User>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert_user(&self, user: models::NewUser) -> Result<models::User, StoreError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("username".to_string()));
        }

        state.next_user_id += 1;
        let stored = models::User {
            id: state.next_user_id,
            username: user.username,
            password: user.password_hash,
            is_pro: false,
            is_admin: false,
            message_count: 0,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            created_at: Utc::now(),
        };
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn update_user_flags(
        &self,
        username: &str,
        flags: models::UserFlags,
    ) -> Result<Option<models::User>, StoreError> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };

        if let Some(is_pro) = flags.is_pro {
            user.is_pro = is_pro;
        }
        if let Some(is_admin) = flags.is_admin {
            user.is_admin = is_admin;
        }
        Ok(Some(user.clone()))
    }

    async fn user_messages(&self, user_id: i32) -> Result<Vec<models::Message>, StoreError> {
        let state = self.state.read().await;
        Ok(state.messages_where(|owner| owner.user_id() == Some(user_id)))
    }

    async fn session_messages(
        &self,
        session_id: &str,
    ) -> Result<Vec<models::Message>, StoreError> {
        let state = self.state.read().await;
        Ok(state.messages_where(|owner| owner.session_id() == Some(session_id)))
    }

    async fn record_user_exchange(
        &self,
        user_id: i32,
        prompt: models::NewMessage,
        reply: models::NewMessage,
    ) -> Result<models::Message, StoreError> {
        let mut state = self.state.write().await;
        state.push_message(prompt);
        let reply = state.push_message(reply);
        if let Some(user) = state.users.iter_mut().find(|u| u.id == user_id) {
            user.message_count += 1;
        }
        Ok(reply)
    }

    async fn fetch_anonymous_session(
        &self,
        session_id: &str,
    ) -> Result<Option<models::AnonymousSession>, StoreError> {
        let state = self.state.read().await;
        Ok(state.anonymous_sessions.get(session_id).cloned())
    }

    async fn get_or_create_anonymous_session(
        &self,
        session_id: &str,
    ) -> Result<models::AnonymousSession, StoreError> {
        let mut state = self.state.write().await;
        if let Some(session) = state.anonymous_sessions.get(session_id) {
            return Ok(session.clone());
        }

        state.next_session_id += 1;
        let session = models::AnonymousSession {
            id: state.next_session_id,
            session_id: session_id.to_string(),
            message_count: 0,
            created_at: Utc::now(),
        };
        state
            .anonymous_sessions
            .insert(session_id.to_string(), session.clone());
        Ok(session)
    }

    async fn record_anonymous_exchange(
        &self,
        session_id: &str,
        limit: i32,
        prompt: models::NewMessage,
        reply: models::NewMessage,
    ) -> Result<Option<models::Message>, StoreError> {
        let mut state = self.state.write().await;
        match state.anonymous_sessions.get_mut(session_id) {
            Some(session) if session.message_count < limit => session.message_count += 1,
            _ => return Ok(None),
        }

        state.push_message(prompt);
        Ok(Some(state.push_message(reply)))
    }

    async fn insert_user_session(
        &self,
        session: models::UserSession,
    ) -> Result<models::UserSession, StoreError> {
        let mut state = self.state.write().await;
        if state.user_sessions.contains_key(&session.token) {
            return Err(StoreError::Conflict("session token".to_string()));
        }
        state
            .user_sessions
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn fetch_user_session(
        &self,
        token: &str,
    ) -> Result<Option<models::UserSession>, StoreError> {
        let state = self.state.read().await;
        Ok(state.user_sessions.get(token).cloned())
    }

    async fn delete_user_session(&self, token: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.user_sessions.remove(token);
        Ok(())
    }

    async fn totals(&self) -> Result<Totals, StoreError> {
        let state = self.state.read().await;
        Ok(Totals {
            user_count: state.users.len() as i64,
            message_count: state.messages.len() as i64,
            pro_users: state.users.iter().filter(|u| u.is_pro).count() as i64,
            anonymous_sessions: state.anonymous_sessions.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewMessage, Owner};

    fn exchange(session: &str) -> (NewMessage, NewMessage) {
        let owner = Owner::Session(session.to_string());
        (
            NewMessage::prompt(owner.clone(), "hi", "gemini-free"),
            NewMessage::reply(owner, "hello", "gemini-free"),
        )
    }

    #[tokio::test]
    async fn anonymous_exchange_stops_at_limit() {
        let repo = MemoryRepository::new();
        repo.get_or_create_anonymous_session("s1").await.unwrap();

        for _ in 0..2 {
            let (prompt, reply) = exchange("s1");
            let stored = repo
                .record_anonymous_exchange("s1", 2, prompt, reply)
                .await
                .unwrap();
            assert!(stored.is_some());
        }

        let (prompt, reply) = exchange("s1");
        let stored = repo
            .record_anonymous_exchange("s1", 2, prompt, reply)
            .await
            .unwrap();
        assert!(stored.is_none());

        let session = repo.fetch_anonymous_session("s1").await.unwrap().unwrap();
        assert_eq!(session.message_count, 2);
        assert_eq!(repo.session_messages("s1").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn anonymous_exchange_needs_existing_session() {
        let repo = MemoryRepository::new();
        let (prompt, reply) = exchange("missing");
        let stored = repo
            .record_anonymous_exchange("missing", 70, prompt, reply)
            .await
            .unwrap();
        assert!(stored.is_none());
        assert!(repo.session_messages("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = MemoryRepository::new();
        let user = models::NewUser {
            username: "ada".to_string(),
            password_hash: "x".to_string(),
        };
        repo.insert_user(user.clone()).await.unwrap();
        let err = repo.insert_user(user).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let repo = MemoryRepository::new();
        let first = repo.get_or_create_anonymous_session("tok").await.unwrap();
        let second = repo.get_or_create_anonymous_session("tok").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(repo.totals().await.unwrap().anonymous_sessions, 1);
    }
}
