use chatbridge::configuration::{get_configuration, DatabaseSettings};
use chatbridge::models::{NewMessage, NewUser, Owner, Role};
use chatbridge::repository::{ChatRepository, PgRepository, StoreError};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::Arc;

async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect_with(&config.connect_options_without_db()).await?;
    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let pool = PgPool::connect_with(config.connect_options()).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

async fn repository() -> Option<(PgRepository, PgPool)> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    match configure_database(&configuration.database).await {
        Ok(pool) => Some((PgRepository::new(pool.clone()), pool)),
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            None
        }
    }
}

fn exchange(owner: Owner) -> (NewMessage, NewMessage) {
    (
        NewMessage::prompt(owner.clone(), "hi", "gemini-free"),
        NewMessage::reply(owner, "hello", "gemini-free"),
    )
}

#[tokio::test]
async fn user_rows_round_trip() {
    let Some((repo, _)) = repository().await else {
        return;
    };

    let user = repo
        .insert_user(NewUser {
            username: "ada".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();
    assert!(!user.is_pro && !user.is_admin);

    let duplicate = repo
        .insert_user(NewUser {
            username: "ada".to_string(),
            password_hash: "hash".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(StoreError::Conflict(_))));

    let (prompt, reply) = exchange(Owner::User(user.id));
    let stored = repo.record_user_exchange(user.id, prompt, reply).await.unwrap();
    assert_eq!(stored.role, Role::Assistant);
    assert_eq!(stored.owner, Owner::User(user.id));

    let messages = repo.user_messages(user.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(repo.fetch_user(user.id).await.unwrap().unwrap().message_count, 1);
}

#[tokio::test]
async fn anonymous_counter_never_passes_the_limit() {
    let Some((repo, _)) = repository().await else {
        return;
    };
    let repo = Arc::new(repo);
    repo.get_or_create_anonymous_session("tab").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            let (prompt, reply) = exchange(Owner::Session("tab".to_string()));
            repo.record_anonymous_exchange("tab", 5, prompt, reply)
                .await
                .unwrap()
                .is_some()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 5);
    let session = repo.fetch_anonymous_session("tab").await.unwrap().unwrap();
    assert_eq!(session.message_count, 5);
    assert_eq!(repo.session_messages("tab").await.unwrap().len(), 10);
}

#[tokio::test]
async fn message_owner_check_is_enforced_by_the_schema() {
    let Some((repo, pool)) = repository().await else {
        return;
    };
    let user = repo
        .insert_user(NewUser {
            username: "ada".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();
    repo.get_or_create_anonymous_session("tab").await.unwrap();

    let both = sqlx::query(
        "INSERT INTO messages (user_id, session_id, content, model_id, role) VALUES ($1, $2, 'x', 'gemini-free', 'user')",
    )
    .bind(user.id)
    .bind("tab")
    .execute(&pool)
    .await;
    assert!(both.is_err());

    let neither = sqlx::query(
        "INSERT INTO messages (content, model_id, role) VALUES ('x', 'gemini-free', 'user')",
    )
    .execute(&pool)
    .await;
    assert!(neither.is_err());

    assert_eq!(repo.totals().await.unwrap().message_count, 0);
}
