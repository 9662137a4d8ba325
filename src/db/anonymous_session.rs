use crate::models;
use sqlx::PgExecutor;
use tracing::Instrument;

pub async fn fetch<'e, E>(
    executor: E,
    session_id: &str,
) -> Result<Option<models::AnonymousSession>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch anonymous session.");
    sqlx::query_as::<_, models::AnonymousSession>(
        "SELECT id, session_id, message_count, created_at FROM anonymous_sessions \
         WHERE session_id = $1",
    )
    .bind(session_id)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
}

/// Inserts the session or returns the existing row for the same token.
pub async fn upsert<'e, E>(
    executor: E,
    session_id: &str,
) -> Result<models::AnonymousSession, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Get or create anonymous session.");
    sqlx::query_as::<_, models::AnonymousSession>(
        "INSERT INTO anonymous_sessions (session_id) VALUES ($1) \
         ON CONFLICT (session_id) DO UPDATE SET session_id = EXCLUDED.session_id \
         RETURNING id, session_id, message_count, created_at",
    )
    .bind(session_id)
    .fetch_one(executor)
    .instrument(query_span)
    .await
}

/// Bumps the counter only while it is below `limit`.
/// Returns the new count, or `None` when the session is missing or already at the limit.
pub async fn increment_below<'e, E>(
    executor: E,
    session_id: &str,
    limit: i32,
) -> Result<Option<i32>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Increment anonymous message count.", limit);
    sqlx::query_scalar::<_, i32>(
        "UPDATE anonymous_sessions SET message_count = message_count + 1 \
         WHERE session_id = $1 AND message_count < $2 \
         RETURNING message_count",
    )
    .bind(session_id)
    .bind(limit)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
}
