use serde::{Deserialize, Serialize};

/// Configuration for external service connectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub openai: Option<OpenAiConfig>,
    pub storage: Option<StorageConfig>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            openai: Some(OpenAiConfig::default()),
            storage: Some(StorageConfig::default()),
        }
    }
}

/// OpenAI-compatible assistants/files API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL including the version segment (e.g., http://localhost:8080/openai/v1)
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Service key. When absent the caller's session token is forwarded (from env: OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/openai/v1".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

/// Object storage (avatars) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the storage server (e.g., http://localhost:54321)
    pub base_url: String,
    /// Bucket holding assistant avatars
    #[serde(default = "StorageConfig::default_avatar_bucket")]
    pub avatar_bucket: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Public API key sent as `apikey` header (from env: STORAGE_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl StorageConfig {
    fn default_avatar_bucket() -> String {
        "assistant_avatars".to_string()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            avatar_bucket: Self::default_avatar_bucket(),
            timeout_secs: 15,
            api_key: None,
        }
    }
}
