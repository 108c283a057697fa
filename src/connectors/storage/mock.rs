use super::ObjectStorage;
use crate::connectors::errors::ConnectorError;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockObjectStorage {
    pub fail: bool,
    pub uploads: Mutex<Vec<(String, bool)>>,
    pub removed: Mutex<Vec<String>>,
}

impl MockObjectStorage {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload(
        &self,
        _access_token: &str,
        path: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<String, ConnectorError> {
        if self.fail {
            return Err(ConnectorError::ServiceUnavailable("mock failure".to_string()));
        }
        self.uploads.lock().unwrap().push((path.to_string(), upsert));
        Ok(path.to_string())
    }

    async fn remove(&self, _access_token: &str, paths: &[String]) -> Result<(), ConnectorError> {
        if self.fail {
            return Err(ConnectorError::ServiceUnavailable("mock failure".to_string()));
        }
        self.removed.lock().unwrap().extend(paths.iter().cloned());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("http://storage.test/public/assistant_avatars/{}", path)
    }
}
