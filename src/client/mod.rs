//! HTTP client the stores use to reach the chat server.

use crate::forms;
use crate::models;
use async_trait::async_trait;

pub mod chat_client;
#[cfg(test)]
pub mod mock;

pub use chat_client::ChatClient;
#[cfg(test)]
pub use mock::MockChatApi;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn create_conversation(
        &self,
        form: &forms::NewConversationForm,
    ) -> Result<models::Conversation, ApiError>;

    async fn create_message(&self, form: &forms::NewMessageForm)
        -> Result<models::Message, ApiError>;
}
