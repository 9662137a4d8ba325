use crate::connectors::ConnectorError;
use crate::db::stats::Totals;
use crate::helpers::JsonResponse;
use crate::models::{AnonymousSession, Message, NewMessage, Owner, User};
use crate::repository::{ChatRepository, StoreError};
use crate::services::dispatcher::ModelDispatcher;
use crate::services::quota::QuotaGuard;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),
    #[error("Session not found")]
    SessionNotFound,
    #[error("Message limit reached")]
    QuotaExceeded,
    #[error("Failed to generate response")]
    Generation(#[source] ConnectorError),
    #[error("Internal error")]
    Storage(#[from] StoreError),
}

impl ResponseError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::SessionNotFound => StatusCode::NOT_FOUND,
            ChatError::QuotaExceeded => StatusCode::FORBIDDEN,
            ChatError::Generation(_) | ChatError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        JsonResponse::new(self.to_string()).to_response(self.status_code())
    }
}

/// Conversation flow for both registered users and anonymous sessions:
/// quota check, model call, then the exchange is persisted.
pub struct ChatService {
    repository: Arc<dyn ChatRepository>,
    dispatcher: ModelDispatcher,
    quota: QuotaGuard,
}

impl ChatService {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        dispatcher: ModelDispatcher,
        quota: QuotaGuard,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            quota,
        }
    }

    pub fn quota(&self) -> QuotaGuard {
        self.quota
    }

    /// Returns the session, creating it with a zero counter on first sight.
    pub async fn anonymous_session(&self, session_id: &str) -> Result<AnonymousSession, ChatError> {
        Ok(self
            .repository
            .get_or_create_anonymous_session(session_id)
            .await?)
    }

    pub async fn anonymous_messages(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        Ok(self.repository.session_messages(session_id).await?)
    }

    #[tracing::instrument(name = "Anonymous send.", skip(self, session_id, content))]
    pub async fn send_anonymous(
        &self,
        session_id: &str,
        content: &str,
        model_id: &str,
    ) -> Result<Message, ChatError> {
        ensure_content(content)?;

        let session = self
            .repository
            .fetch_anonymous_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        if !self.quota.allows(&session) {
            tracing::info!(count = session.message_count, "Anonymous quota exhausted");
            return Err(ChatError::QuotaExceeded);
        }

        let reply = self.generate(model_id, content).await?;
        let owner = Owner::Session(session_id.to_string());

        self.repository
            .record_anonymous_exchange(
                session_id,
                self.quota.limit(),
                NewMessage::prompt(owner.clone(), content, model_id),
                NewMessage::reply(owner, reply, model_id),
            )
            .await?
            .ok_or_else(|| {
                tracing::info!("Quota reached by a concurrent send, reply discarded");
                ChatError::QuotaExceeded
            })
    }

    pub async fn user_messages(&self, user_id: i32) -> Result<Vec<Message>, ChatError> {
        Ok(self.repository.user_messages(user_id).await?)
    }

    #[tracing::instrument(name = "User send.", skip(self, user, content), fields(user_id = user.id))]
    pub async fn send_user(
        &self,
        user: &User,
        content: &str,
        model_id: &str,
    ) -> Result<Message, ChatError> {
        ensure_content(content)?;

        let reply = self.generate(model_id, content).await?;
        let owner = Owner::User(user.id);

        Ok(self
            .repository
            .record_user_exchange(
                user.id,
                NewMessage::prompt(owner.clone(), content, model_id),
                NewMessage::reply(owner, reply, model_id),
            )
            .await?)
    }

    pub async fn totals(&self) -> Result<Totals, ChatError> {
        Ok(self.repository.totals().await?)
    }

    async fn generate(&self, model_id: &str, content: &str) -> Result<String, ChatError> {
        self.dispatcher
            .generate(model_id, content)
            .await
            .map_err(|err| {
                tracing::error!("Generation failed for {}: {}", model_id, err);
                ChatError::Generation(err)
            })
    }
}

fn ensure_content(content: &str) -> Result<(), ChatError> {
    if content.trim().is_empty() {
        return Err(ChatError::Validation("content must not be blank".to_string()));
    }
    Ok(())
}
