use super::ObjectStorage;
use crate::connectors::config::StorageConfig;
use crate::connectors::errors::ConnectorError;
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: String,
}

/// Storage REST client bound to the avatar bucket
pub struct StorageClient {
    pub(crate) base_url: String,
    pub(crate) bucket: String,
    pub(crate) http_client: reqwest::Client,
    pub(crate) api_key: Option<String>,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs.max(1));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bucket: config.avatar_bucket,
            http_client,
            api_key: config.api_key,
        })
    }

    fn with_auth(&self, req: reqwest::RequestBuilder, access_token: &str) -> reqwest::RequestBuilder {
        let req = req.bearer_auth(access_token);
        match &self.api_key {
            Some(key) => req.header("apikey", key),
            None => req,
        }
    }
}

#[async_trait::async_trait]
impl ObjectStorage for StorageClient {
    async fn upload(
        &self,
        access_token: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<String, ConnectorError> {
        let span = tracing::info_span!("storage_upload", bucket = %self.bucket, path = %path);
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);

        let req = self
            .http_client
            .post(&url)
            .header("content-type", content_type)
            .header("x-upsert", upsert.to_string())
            .body(bytes);

        let resp = self.with_auth(req, access_token).send().instrument(span).await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::error!("storage upload of {} failed {}: {}", path, status, text);
            return Err(ConnectorError::from_status(status, text));
        }

        // Key comes back as "<bucket>/<path>"
        let stored = serde_json::from_str::<UploadResponse>(&text)
            .map_err(|_| ConnectorError::InvalidResponse(text))?;
        let prefix = format!("{}/", self.bucket);
        Ok(stored
            .key
            .strip_prefix(&prefix)
            .unwrap_or(&stored.key)
            .to_string())
    }

    async fn remove(&self, access_token: &str, paths: &[String]) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("storage_remove", bucket = %self.bucket, count = paths.len());
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);

        let req = self
            .http_client
            .delete(&url)
            .json(&json!({ "prefixes": paths }));

        let resp = self.with_auth(req, access_token).send().instrument(span).await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("storage remove failed {}: {}", status, text);
            return Err(ConnectorError::from_status(status, text));
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}
