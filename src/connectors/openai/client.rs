use super::{AssistantsConnector, UploadFile};
use crate::connectors::config::OpenAiConfig;
use crate::connectors::errors::ConnectorError;
use crate::models;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::Instrument;

/// List envelope used by the API: `{ "object": "list", "data": [...] }`
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

/// HTTP client for an OpenAI-compatible API
pub struct OpenAiClient {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
    pub(crate) api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs.max(1));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            api_key: config.api_key,
        })
    }

    /// Service key if configured, otherwise the caller's session token.
    fn bearer<'a>(&'a self, access_token: &'a str) -> &'a str {
        self.api_key.as_deref().unwrap_or(access_token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T>(&self, req: reqwest::RequestBuilder, span: tracing::Span) -> Result<T, ConnectorError>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().instrument(span).await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::error!("assistants API responded {}: {}", status, text);
            return Err(ConnectorError::from_status(status, text));
        }

        serde_json::from_str::<T>(&text).map_err(|_| ConnectorError::InvalidResponse(text))
    }
}

#[async_trait::async_trait]
impl AssistantsConnector for OpenAiClient {
    async fn list_files(&self, access_token: &str) -> Result<Vec<models::FileObject>, ConnectorError> {
        let span = tracing::info_span!("openai_list_files");
        let req = self
            .http_client
            .get(self.url("/files"))
            .bearer_auth(self.bearer(access_token));

        self.send::<ListResponse<models::FileObject>>(req, span)
            .await
            .map(|list| list.data)
    }

    async fn upload_file(
        &self,
        access_token: &str,
        file: UploadFile,
    ) -> Result<models::FileObject, ConnectorError> {
        let span = tracing::info_span!("openai_upload_file", filename = %file.filename);
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)
            .map_err(|err| ConnectorError::Internal(err.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let req = self
            .http_client
            .post(self.url("/files"))
            .bearer_auth(self.bearer(access_token))
            .multipart(form);

        self.send(req, span).await
    }

    async fn delete_file(&self, access_token: &str, file_id: &str) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("openai_delete_file", file_id = %file_id);
        let req = self
            .http_client
            .delete(self.url(&format!("/files/{}", file_id)))
            .bearer_auth(self.bearer(access_token));

        self.send::<serde_json::Value>(req, span).await.map(|_| ())
    }

    async fn list_assistants(
        &self,
        access_token: &str,
    ) -> Result<Vec<models::Assistant>, ConnectorError> {
        let span = tracing::info_span!("openai_list_assistants");
        let req = self
            .http_client
            .get(self.url("/assistants"))
            .bearer_auth(self.bearer(access_token));

        self.send::<ListResponse<models::Assistant>>(req, span)
            .await
            .map(|list| list.data)
    }

    async fn retrieve_assistant(
        &self,
        access_token: &str,
        assistant_id: &str,
    ) -> Result<Option<models::Assistant>, ConnectorError> {
        let span = tracing::info_span!("openai_retrieve_assistant", assistant_id = %assistant_id);
        let req = self
            .http_client
            .get(self.url(&format!("/assistants/{}", assistant_id)))
            .bearer_auth(self.bearer(access_token));

        match self.send(req, span).await {
            Ok(assistant) => Ok(Some(assistant)),
            Err(ConnectorError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_assistant(
        &self,
        access_token: &str,
        params: &models::AssistantParams,
    ) -> Result<models::Assistant, ConnectorError> {
        let span = tracing::info_span!("openai_create_assistant");
        let req = self
            .http_client
            .post(self.url("/assistants"))
            .bearer_auth(self.bearer(access_token))
            .json(params);

        self.send(req, span).await
    }

    async fn update_assistant(
        &self,
        access_token: &str,
        assistant_id: &str,
        params: &models::AssistantParams,
    ) -> Result<models::Assistant, ConnectorError> {
        let span = tracing::info_span!("openai_update_assistant", assistant_id = %assistant_id);
        let req = self
            .http_client
            .post(self.url(&format!("/assistants/{}", assistant_id)))
            .bearer_auth(self.bearer(access_token))
            .json(params);

        self.send(req, span).await
    }

    async fn delete_assistant(
        &self,
        access_token: &str,
        assistant_id: &str,
    ) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("openai_delete_assistant", assistant_id = %assistant_id);
        let req = self
            .http_client
            .delete(self.url(&format!("/assistants/{}", assistant_id)))
            .bearer_auth(self.bearer(access_token));

        self.send::<serde_json::Value>(req, span).await.map(|_| ())
    }
}
