use crate::models;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewMessageForm {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub conversation_id: Uuid,
    #[validate(min_length = 1)]
    pub content: String,
    pub role: models::Role,
    #[serde(default)]
    pub inserted_at: Option<DateTime<Utc>>,
}

impl NewMessageForm {
    pub fn into_model(self, user_id: &str) -> models::Message {
        models::Message {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            conversation_id: self.conversation_id,
            user_id: user_id.to_string(),
            role: self.role,
            content: self.content,
            inserted_at: self.inserted_at.unwrap_or_else(Utc::now),
        }
    }
}
