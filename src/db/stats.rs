use sqlx::PgExecutor;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Totals {
    pub user_count: i64,
    pub message_count: i64,
    pub pro_users: i64,
    pub anonymous_sessions: i64,
}

pub async fn totals<'e, E>(executor: E) -> Result<Totals, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Aggregate admin statistics.");
    sqlx::query_as::<_, Totals>(
        r#"SELECT
             (SELECT COUNT(*) FROM users) AS user_count,
             (SELECT COUNT(*) FROM messages) AS message_count,
             (SELECT COUNT(*) FROM users WHERE is_pro) AS pro_users,
             (SELECT COUNT(*) FROM anonymous_sessions) AS anonymous_sessions"#,
    )
    .fetch_one(executor)
    .instrument(query_span)
    .await
}
