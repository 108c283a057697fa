use super::{AssistantsConnector, UploadFile};
use crate::connectors::errors::ConnectorError;
use crate::models;
use std::sync::Mutex;

/// In-memory assistants API for route tests. Calls are recorded so tests can
/// assert on what reached the API.
#[derive(Default)]
pub struct MockAssistantsConnector {
    pub fail: bool,
    pub files: Vec<models::FileObject>,
    pub assistants: Vec<models::Assistant>,
    pub uploaded: Mutex<Vec<String>>,
    pub deleted_files: Mutex<Vec<String>>,
    pub created: Mutex<Vec<models::AssistantParams>>,
    pub updated: Mutex<Vec<(String, models::AssistantParams)>>,
}

impl MockAssistantsConnector {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_assistant(assistant: models::Assistant) -> Self {
        Self {
            assistants: vec![assistant],
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), ConnectorError> {
        if self.fail {
            return Err(ConnectorError::ServiceUnavailable("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AssistantsConnector for MockAssistantsConnector {
    async fn list_files(&self, _access_token: &str) -> Result<Vec<models::FileObject>, ConnectorError> {
        self.check()?;
        Ok(self.files.clone())
    }

    async fn upload_file(
        &self,
        _access_token: &str,
        file: UploadFile,
    ) -> Result<models::FileObject, ConnectorError> {
        self.check()?;
        let mut uploaded = self.uploaded.lock().unwrap();
        uploaded.push(file.filename.clone());
        Ok(models::FileObject {
            id: format!("file-{}", uploaded.len()),
            filename: file.filename,
            bytes: file.bytes.len() as u64,
            created_at: 1_700_000_000,
            purpose: "assistants".to_string(),
            status: Some("processed".to_string()),
        })
    }

    async fn delete_file(&self, _access_token: &str, file_id: &str) -> Result<(), ConnectorError> {
        self.check()?;
        self.deleted_files.lock().unwrap().push(file_id.to_string());
        Ok(())
    }

    async fn list_assistants(
        &self,
        _access_token: &str,
    ) -> Result<Vec<models::Assistant>, ConnectorError> {
        self.check()?;
        Ok(self.assistants.clone())
    }

    async fn retrieve_assistant(
        &self,
        _access_token: &str,
        assistant_id: &str,
    ) -> Result<Option<models::Assistant>, ConnectorError> {
        self.check()?;
        Ok(self.assistants.iter().find(|a| a.id == assistant_id).cloned())
    }

    async fn create_assistant(
        &self,
        _access_token: &str,
        params: &models::AssistantParams,
    ) -> Result<models::Assistant, ConnectorError> {
        self.check()?;
        self.created.lock().unwrap().push(params.clone());
        Ok(models::Assistant {
            id: "asst_mock".to_string(),
            name: params.name.clone(),
            description: params.description.clone(),
            instructions: params.instructions.clone(),
            model: params.model.clone().unwrap_or_default(),
            temperature: params.temperature,
            metadata: params.metadata.clone().unwrap_or_default(),
            created_at: 1_700_000_000,
        })
    }

    async fn update_assistant(
        &self,
        _access_token: &str,
        assistant_id: &str,
        params: &models::AssistantParams,
    ) -> Result<models::Assistant, ConnectorError> {
        self.check()?;
        self.updated
            .lock()
            .unwrap()
            .push((assistant_id.to_string(), params.clone()));
        Ok(models::Assistant {
            id: assistant_id.to_string(),
            metadata: params.metadata.clone().unwrap_or_default(),
            ..Default::default()
        })
    }

    async fn delete_assistant(
        &self,
        _access_token: &str,
        _assistant_id: &str,
    ) -> Result<(), ConnectorError> {
        self.check()
    }
}
