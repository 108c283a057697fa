use super::{ApiError, ChatApi};
use crate::forms;
use crate::models;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory `ChatApi`. Labels listed in `fail_labels` fail creation;
/// `fail_messages` fails every message.
#[derive(Default)]
pub struct MockChatApi {
    pub fail_labels: Vec<String>,
    pub fail_messages: bool,
    /// Per-message delay keyed by content, to reorder completions
    pub message_delays: Vec<(String, Duration)>,
    pub messages: Mutex<Vec<forms::NewMessageForm>>,
}

impl MockChatApi {
    pub fn failing_messages() -> Self {
        Self {
            fail_messages: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn create_conversation(
        &self,
        form: &forms::NewConversationForm,
    ) -> Result<models::Conversation, ApiError> {
        if self.fail_labels.contains(&form.label) {
            return Err(ApiError::Status {
                status: 500,
                message: "Error creating conversation.".to_string(),
            });
        }
        Ok(form.clone().into_model("user-1", 100))
    }

    async fn create_message(
        &self,
        form: &forms::NewMessageForm,
    ) -> Result<models::Message, ApiError> {
        if let Some((_, delay)) = self
            .message_delays
            .iter()
            .find(|(content, _)| *content == form.content)
        {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_messages {
            return Err(ApiError::Unreachable("connection refused".to_string()));
        }
        self.messages.lock().unwrap().push(form.clone());
        Ok(form.clone().into_model("user-1"))
    }
}
