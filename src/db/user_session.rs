use crate::models;
use sqlx::PgExecutor;
use tracing::Instrument;

pub async fn insert<'e, E>(
    executor: E,
    session: &models::UserSession,
) -> Result<models::UserSession, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Saving login session.", user_id = session.user_id);
    sqlx::query_as::<_, models::UserSession>(
        "INSERT INTO user_sessions (token, user_id, created_at, expires_at) \
         VALUES ($1, $2, $3, $4) RETURNING token, user_id, created_at, expires_at",
    )
    .bind(&session.token)
    .bind(session.user_id)
    .bind(session.created_at)
    .bind(session.expires_at)
    .fetch_one(executor)
    .instrument(query_span)
    .await
}

pub async fn fetch<'e, E>(
    executor: E,
    token: &str,
) -> Result<Option<models::UserSession>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch login session.");
    sqlx::query_as::<_, models::UserSession>(
        "SELECT token, user_id, created_at, expires_at FROM user_sessions WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
}

pub async fn delete<'e, E>(executor: E, token: &str) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Delete login session.");
    sqlx::query("DELETE FROM user_sessions WHERE token = $1")
        .bind(token)
        .execute(executor)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected())
}
