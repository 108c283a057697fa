use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub subtitle: String,
}

impl Toast {
    pub fn error(subtitle: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Error,
            title: "Error".to_string(),
            subtitle: subtitle.into(),
        }
    }
}
