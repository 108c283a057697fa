use serde::{Deserialize, Serialize};

pub const DEFAULT_ASSISTANT_TEMP: f32 = 0.2;
pub const DEFAULT_PICTOGRAM: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMetadata {
    #[serde(default)]
    pub data_sources: String,
    #[serde(default)]
    pub pictogram: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub user_id: String,
}

impl AssistantMetadata {
    pub fn defaults() -> Self {
        AssistantMetadata {
            pictogram: DEFAULT_PICTOGRAM.to_string(),
            ..Default::default()
        }
    }
}

/// Assistant as stored by the assistants API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub metadata: AssistantMetadata,
    #[serde(default)]
    pub created_at: i64,
}

/// Body for assistant create and update calls. Absent fields are left untouched
/// by the API on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AssistantMetadata>,
}
