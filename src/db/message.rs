use crate::models;
use sqlx::PgExecutor;
use tracing::Instrument;

const MESSAGE_COLUMNS: &str = "id, user_id, session_id, content, model_id, role, timestamp";

pub async fn insert<'e, E>(
    executor: E,
    message: &models::NewMessage,
) -> Result<models::Message, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Saving new message into the database.", role = %message.role);
    sqlx::query_as::<_, models::Message>(&format!(
        "INSERT INTO messages (user_id, session_id, content, model_id, role, timestamp) \
         VALUES ($1, $2, $3, $4, $5, clock_timestamp()) RETURNING {MESSAGE_COLUMNS}"
    ))
    .bind(message.owner.user_id())
    .bind(message.owner.session_id())
    .bind(&message.content)
    .bind(&message.model_id)
    .bind(message.role.as_str())
    .fetch_one(executor)
    .instrument(query_span)
    .await
}

pub async fn fetch_by_user<'e, E>(
    executor: E,
    user_id: i32,
) -> Result<Vec<models::Message>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch user messages.", user_id);
    sqlx::query_as::<_, models::Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE user_id = $1 ORDER BY timestamp, id"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .instrument(query_span)
    .await
}

pub async fn fetch_by_session<'e, E>(
    executor: E,
    session_id: &str,
) -> Result<Vec<models::Message>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch anonymous session messages.");
    sqlx::query_as::<_, models::Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE session_id = $1 ORDER BY timestamp, id"
    ))
    .bind(session_id)
    .fetch_all(executor)
    .instrument(query_span)
    .await
}
