use super::{ApiError, ChatApi};
use crate::forms;
use crate::models;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Envelope returned by the server routes
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    message: String,
    item: Option<T>,
}

pub struct ChatClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl ChatClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ApiError::Unreachable(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    async fn post_item<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Unreachable(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            // prefer the envelope message over the raw body
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .map(|api| api.message)
                .unwrap_or(body);
            tracing::debug!("POST {} failed ({}): {}", path, status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let api: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        api.item
            .ok_or_else(|| ApiError::InvalidResponse(format!("POST {} returned no item", path)))
    }
}

#[async_trait]
impl ChatApi for ChatClient {
    async fn create_conversation(
        &self,
        form: &forms::NewConversationForm,
    ) -> Result<models::Conversation, ApiError> {
        self.post_item("/api/conversations/new", form).await
    }

    async fn create_message(
        &self,
        form: &forms::NewMessageForm,
    ) -> Result<models::Message, ApiError> {
        self.post_item("/api/messages/new", form).await
    }
}
