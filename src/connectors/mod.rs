//! External Service Connectors
//!
//! Adapters for the services the chat back end depends on: the
//! OpenAI-compatible assistants/files API and the object storage holding
//! assistant avatars.
//!
//! ## Architecture Pattern
//!
//! 1. Define trait in `{service}/mod.rs` → allows mocking in tests
//! 2. Implement HTTP client in `{service}/client.rs`
//! 3. Configuration in `config.rs`
//! 4. Inject trait object into routes → routes never depend on HTTP implementation

pub mod config;
pub mod errors;
pub mod openai;
pub mod storage;

pub use config::{ConnectorConfig, OpenAiConfig, StorageConfig};
pub use errors::ConnectorError;
pub use openai::{AssistantsConnector, OpenAiClient, UploadFile};
pub use storage::{ObjectStorage, StorageClient};

use actix_web::web;
use std::sync::Arc;

/// Build the assistants API connector. Reads `OPENAI_API_KEY` when the config
/// carries no key.
pub fn init_assistants(
    connector_config: &ConnectorConfig,
) -> Result<web::Data<Arc<dyn AssistantsConnector>>, ConnectorError> {
    let mut config = connector_config.openai.clone().unwrap_or_default();
    if config.api_key.is_none() {
        config.api_key = std::env::var("OPENAI_API_KEY").ok();
    }
    tracing::info!("Initializing assistants API connector: {}", config.base_url);

    let connector: Arc<dyn AssistantsConnector> = Arc::new(OpenAiClient::new(config)?);
    Ok(web::Data::new(connector))
}

/// Build the avatar storage connector. Reads `STORAGE_API_KEY` when the config
/// carries no key.
pub fn init_storage(
    connector_config: &ConnectorConfig,
) -> Result<web::Data<Arc<dyn ObjectStorage>>, ConnectorError> {
    let mut config = connector_config.storage.clone().unwrap_or_default();
    if config.api_key.is_none() {
        config.api_key = std::env::var("STORAGE_API_KEY").ok();
    }
    tracing::info!(
        "Initializing storage connector: {} (bucket {})",
        config.base_url,
        config.avatar_bucket
    );

    let connector: Arc<dyn ObjectStorage> = Arc::new(StorageClient::new(config)?);
    Ok(web::Data::new(connector))
}
