//! OpenAI-compatible assistants/files API connector
//!
//! Routes talk to the assistants API only through [`AssistantsConnector`], so
//! tests can swap in the mock.

use crate::connectors::errors::ConnectorError;
use crate::models;
use async_trait::async_trait;

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::OpenAiClient;
#[cfg(test)]
pub use mock::MockAssistantsConnector;

/// File payload handed to the upload call.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AssistantsConnector: Send + Sync {
    /// List files stored for assistants
    async fn list_files(&self, access_token: &str) -> Result<Vec<models::FileObject>, ConnectorError>;

    /// Upload a file with purpose `assistants`
    async fn upload_file(
        &self,
        access_token: &str,
        file: UploadFile,
    ) -> Result<models::FileObject, ConnectorError>;

    async fn delete_file(&self, access_token: &str, file_id: &str) -> Result<(), ConnectorError>;

    async fn list_assistants(
        &self,
        access_token: &str,
    ) -> Result<Vec<models::Assistant>, ConnectorError>;

    /// `Ok(None)` when the API does not know the id
    async fn retrieve_assistant(
        &self,
        access_token: &str,
        assistant_id: &str,
    ) -> Result<Option<models::Assistant>, ConnectorError>;

    async fn create_assistant(
        &self,
        access_token: &str,
        params: &models::AssistantParams,
    ) -> Result<models::Assistant, ConnectorError>;

    async fn update_assistant(
        &self,
        access_token: &str,
        assistant_id: &str,
        params: &models::AssistantParams,
    ) -> Result<models::Assistant, ConnectorError>;

    async fn delete_assistant(
        &self,
        access_token: &str,
        assistant_id: &str,
    ) -> Result<(), ConnectorError>;
}
