use crate::models;
use sqlx::PgExecutor;
use tracing::Instrument;

const USER_COLUMNS: &str = "id, username, password, is_pro, is_admin, message_count, \
    stripe_customer_id, stripe_subscription_id, created_at";

pub async fn fetch<'e, E>(executor: E, id: i32) -> Result<Option<models::User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch user by id.", user_id = id);
    sqlx::query_as::<_, models::User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .instrument(query_span)
        .await
}

pub async fn fetch_by_username<'e, E>(
    executor: E,
    username: &str,
) -> Result<Option<models::User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch user by username.");
    sqlx::query_as::<_, models::User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
}

pub async fn insert<'e, E>(executor: E, user: &models::NewUser) -> Result<models::User, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Saving new user into the database.");
    sqlx::query_as::<_, models::User>(&format!(
        "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
    ))
    .bind(&user.username)
    .bind(&user.password_hash)
    .fetch_one(executor)
    .instrument(query_span)
    .await
}

pub async fn increment_message_count<'e, E>(executor: E, id: i32) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Increment user message count.", user_id = id);
    sqlx::query("UPDATE users SET message_count = message_count + 1 WHERE id = $1")
        .bind(id)
        .execute(executor)
        .instrument(query_span)
        .await
        .map(|_| ())
}

pub async fn update_flags<'e, E>(
    executor: E,
    username: &str,
    flags: models::UserFlags,
) -> Result<Option<models::User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Update user flags.", username = %username);
    sqlx::query_as::<_, models::User>(&format!(
        "UPDATE users SET is_pro = COALESCE($2, is_pro), is_admin = COALESCE($3, is_admin) \
         WHERE username = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(flags.is_pro)
    .bind(flags.is_admin)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
}
