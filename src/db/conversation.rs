use super::DbError;
use crate::models;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct ConversationRecord {
    id: Uuid,
    user_id: String,
    label: String,
    inserted_at: DateTime<Utc>,
}

impl From<ConversationRecord> for models::Conversation {
    fn from(record: ConversationRecord) -> Self {
        models::Conversation {
            id: record.id,
            user_id: record.user_id,
            label: record.label,
            messages: vec![],
            inserted_at: record.inserted_at,
        }
    }
}

/// Conversation owned by `user_id`, without messages.
pub async fn fetch(
    pool: &PgPool,
    id: Uuid,
    user_id: &str,
) -> Result<Option<models::Conversation>, DbError> {
    let query_span = tracing::info_span!("Fetch conversation", %id);
    sqlx::query_as::<_, ConversationRecord>(
        r#"SELECT id, user_id, label, inserted_at FROM conversations WHERE id = $1 AND user_id = $2"#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map(|record| record.map(Into::into))
    .map_err(|err| {
        tracing::error!("Failed to fetch conversation, error: {:?}", err);
        err.into()
    })
}

/// All conversations of a user with their messages, oldest first.
pub async fn fetch_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<models::Conversation>, DbError> {
    let query_span = tracing::info_span!("Fetch conversations by user id.");
    let mut conversations: Vec<models::Conversation> = sqlx::query_as::<_, ConversationRecord>(
        r#"SELECT id, user_id, label, inserted_at FROM conversations
           WHERE user_id = $1
           ORDER BY inserted_at ASC"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch conversations, error: {:?}", err);
        DbError::from(err)
    })?
    .into_iter()
    .map(Into::into)
    .collect();

    let messages = super::message::fetch_by_user(pool, user_id).await?;
    for message in messages {
        if let Some(conversation) = conversations
            .iter_mut()
            .find(|c| c.id == message.conversation_id)
        {
            conversation.messages.push(message);
        }
    }

    Ok(conversations)
}

pub async fn insert(
    pool: &PgPool,
    conversation: models::Conversation,
) -> Result<models::Conversation, DbError> {
    let query_span = tracing::info_span!("Saving new conversation into the database");
    sqlx::query(
        r#"INSERT INTO conversations (id, user_id, label, inserted_at) VALUES ($1, $2, $3, $4)"#,
    )
    .bind(conversation.id)
    .bind(&conversation.user_id)
    .bind(&conversation.label)
    .bind(conversation.inserted_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| conversation)
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err.into()
    })
}

/// Returns false when the user owns no such conversation.
pub async fn update_label(
    pool: &PgPool,
    id: Uuid,
    user_id: &str,
    label: &str,
) -> Result<bool, DbError> {
    let query_span = tracing::info_span!("Updating conversation label", %id);
    sqlx::query(r#"UPDATE conversations SET label = $3 WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .bind(label)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err.into()
        })
}

#[tracing::instrument(name = "Delete conversation of a user.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid, user_id: &str) -> Result<bool, DbError> {
    sqlx::query(r#"DELETE FROM conversations WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete conversation: {:?}", err);
            err.into()
        })
}
