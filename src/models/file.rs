use serde::{Deserialize, Serialize};

/// File object as returned by the assistants/files API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub bytes: u64,
    pub created_at: i64,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[serde(rename = "uploading")]
    Pending,
    Complete,
    #[serde(rename = "error")]
    Failed,
}

/// UI-facing projection of an uploaded file's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRow {
    pub id: String,
    pub filename: String,
    pub created_at: Option<i64>,
    pub status: FileStatus,
}

impl From<FileObject> for FileRow {
    fn from(file: FileObject) -> Self {
        let status = match file.status.as_deref() {
            Some("error") => FileStatus::Failed,
            _ => FileStatus::Complete,
        };
        FileRow {
            id: file.id,
            filename: file.filename,
            created_at: Some(file.created_at),
            status,
        }
    }
}
