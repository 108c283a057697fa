//! Object storage connector (assistant avatars)

use crate::connectors::errors::ConnectorError;
use async_trait::async_trait;

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::StorageClient;
#[cfg(test)]
pub use mock::MockObjectStorage;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `path`; returns the stored object path.
    async fn upload(
        &self,
        access_token: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<String, ConnectorError>;

    async fn remove(&self, access_token: &str, paths: &[String]) -> Result<(), ConnectorError>;

    /// Publicly reachable URL of a stored object
    fn public_url(&self, path: &str) -> String;
}
