use crate::models;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewConversationForm {
    /// Kept when importing, generated otherwise
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(min_length = 1)]
    pub label: String,
    #[serde(default)]
    pub inserted_at: Option<DateTime<Utc>>,
}

impl NewConversationForm {
    pub fn into_model(self, user_id: &str, max_label_size: usize) -> models::Conversation {
        models::Conversation {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id: user_id.to_string(),
            label: models::truncate_label(&self.label, max_label_size),
            messages: vec![],
            inserted_at: self.inserted_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateLabelForm {
    pub id: Uuid,
    #[validate(min_length = 1)]
    pub label: String,
}
