use super::DbError;
use crate::models;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct MessageRecord {
    id: Uuid,
    conversation_id: Uuid,
    user_id: String,
    role: String,
    content: String,
    inserted_at: DateTime<Utc>,
}

impl TryFrom<MessageRecord> for models::Message {
    type Error = DbError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        Ok(models::Message {
            id: record.id,
            conversation_id: record.conversation_id,
            user_id: record.user_id,
            role: record.role.parse().map_err(DbError::Query)?,
            content: record.content,
            inserted_at: record.inserted_at,
        })
    }
}

pub async fn fetch_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<models::Message>, DbError> {
    let query_span = tracing::info_span!("Fetch messages by user id.");
    sqlx::query_as::<_, MessageRecord>(
        r#"SELECT id, conversation_id, user_id, role, content, inserted_at FROM messages
           WHERE user_id = $1
           ORDER BY inserted_at ASC"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch messages, error: {:?}", err);
        DbError::from(err)
    })?
    .into_iter()
    .map(models::Message::try_from)
    .collect()
}

pub async fn insert(pool: &PgPool, message: models::Message) -> Result<models::Message, DbError> {
    let query_span = tracing::info_span!("Saving new message into the database");
    sqlx::query(
        r#"INSERT INTO messages (id, conversation_id, user_id, role, content, inserted_at)
           VALUES ($1, $2, $3, $4, $5, $6)"#,
    )
    .bind(message.id)
    .bind(message.conversation_id)
    .bind(&message.user_id)
    .bind(message.role.as_str())
    .bind(&message.content)
    .bind(message.inserted_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| message)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err.into()
    })
}
