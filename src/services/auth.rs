use crate::configuration::AuthSettings;
use crate::helpers::token::make_secret;
use crate::helpers::JsonResponse;
use crate::models::{NewUser, User, UserSession};
use crate::repository::{ChatRepository, StoreError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub const SESSION_TOKEN_LEN: usize = 48;
const TOKEN_ATTEMPTS: usize = 3;
const DUMMY_PASSWORD: &str = "chatbridge-no-such-user";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal error")]
    Storage(#[from] StoreError),
    #[error("Internal error")]
    Hashing(String),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) | AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AuthError::Unauthorized => HttpResponse::Unauthorized().finish(),
            _ => JsonResponse::new(self.to_string()).to_response(self.status_code()),
        }
    }
}

/// Password accounts and cookie-backed login sessions.
pub struct AuthService {
    repository: Arc<dyn ChatRepository>,
    settings: AuthSettings,
    /// Verified against when the username is unknown, so a miss costs one bcrypt run too.
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn ChatRepository>, settings: AuthSettings) -> Self {
        Self {
            repository,
            settings,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    #[tracing::instrument(name = "Register user.", skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, UserSession), AuthError> {
        if self.repository.fetch_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(password.to_string(), self.settings.password_cost).await?;
        let user = self
            .repository
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => AuthError::UsernameTaken,
                err => AuthError::Storage(err),
            })?;

        let session = self.open_session(user.id).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok((user, session))
    }

    #[tracing::instrument(name = "Login.", skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, UserSession), AuthError> {
        let Some(user) = self.repository.fetch_user_by_username(username).await? else {
            let cost = self.settings.password_cost;
            let hash = self
                .dummy_hash
                .get_or_try_init(|| hash_password(DUMMY_PASSWORD.to_string(), cost))
                .await?;
            verify_password(password.to_string(), hash.clone()).await?;
            tracing::info!("Unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), user.password.clone()).await? {
            tracing::info!("Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.open_session(user.id).await?;
        Ok((user, session))
    }

    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.repository.delete_user_session(token).await?;
        Ok(())
    }

    /// Resolves a session cookie to its user. Expired sessions are removed.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let session = self
            .repository
            .fetch_user_session(token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if session.is_expired(Utc::now()) {
            self.repository.delete_user_session(token).await?;
            return Err(AuthError::Unauthorized);
        }

        self.repository
            .fetch_user(session.user_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }

    async fn open_session(&self, user_id: i32) -> Result<UserSession, AuthError> {
        let mut attempts = 0;
        loop {
            let now = Utc::now();
            let session = UserSession {
                token: make_secret(SESSION_TOKEN_LEN),
                user_id,
                created_at: now,
                expires_at: now + Duration::seconds(self.settings.session_ttl_secs),
            };

            match self.repository.insert_user_session(session).await {
                Ok(session) => return Ok(session),
                Err(StoreError::Conflict(_)) if attempts + 1 < TOKEN_ATTEMPTS => attempts += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|err| AuthError::Hashing(err.to_string()))?
        .map_err(|err| AuthError::Hashing(err.to_string()))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|err| AuthError::Hashing(err.to_string()))?
        .map_err(|err| AuthError::Hashing(err.to_string()))
}
