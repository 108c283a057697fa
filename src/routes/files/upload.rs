use crate::configuration::Settings;
use crate::connectors::{AssistantsConnector, ConnectorError, UploadFile};
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{post, web, Responder, Result};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Uploads under this name always fail, so the error-row path can be
/// exercised from the UI.
pub const SIMULATED_FAILURE_FILENAME: &str = "Resume.pdf";

async fn upload_one(
    assistants: &dyn AssistantsConnector,
    token: &str,
    file: forms::FileInput,
) -> models::FileRow {
    let result = async {
        if file.name == SIMULATED_FAILURE_FILENAME {
            return Err(ConnectorError::Internal("simulated upload failure".to_string()));
        }
        let bytes = file
            .decode()
            .map_err(|err| ConnectorError::Internal(err.to_string()))?;
        assistants
            .upload_file(
                token,
                UploadFile {
                    filename: file.name.clone(),
                    content_type: file.content_type.clone(),
                    bytes,
                },
            )
            .await
    }
    .await;

    match result {
        Ok(uploaded) => uploaded.into(),
        Err(err) => {
            tracing::error!("Error uploading file {}: {}", file.name, err);
            models::FileRow {
                id: Uuid::new_v4().to_string(),
                filename: file.name,
                created_at: Some(Utc::now().timestamp()),
                status: models::FileStatus::Failed,
            }
        }
    }
}

/// POST /chat/file-management
///
/// Files are uploaded one at a time. A failing file becomes an `error` row in
/// the response and the remaining files are still uploaded.
#[tracing::instrument(name = "Upload files.", skip_all, fields(user_id = %session.id))]
#[post("")]
pub async fn upload(
    session: Session,
    form: web::Json<forms::FilesForm>,
    settings: web::Data<Settings>,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate_files(settings.limits.max_file_size()) {
        tracing::debug!("Invalid data received {:?}", errors);
        return Err(JsonResponse::<models::FileRow>::build().form_error(Value::Object(errors)));
    }

    let token = session.access_token.clone().unwrap_or_default();
    let mut uploaded = vec![];
    for file in form.into_inner().files.into_iter().flatten() {
        uploaded.push(upload_one(assistants.get_ref().as_ref(), &token, file).await);
    }

    Ok(JsonResponse::build().set_list(uploaded).ok("OK"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::openai::MockAssistantsConnector;
    use base64::{engine::general_purpose, Engine as _};

    fn input(name: &str) -> forms::FileInput {
        forms::FileInput {
            name: name.to_string(),
            content_type: "text/plain".to_string(),
            size: 5,
            data: Some(general_purpose::STANDARD.encode(b"hello")),
        }
    }

    #[tokio::test]
    async fn reserved_name_fails_without_calling_api() {
        let assistants = MockAssistantsConnector::default();
        let row = upload_one(&assistants, "token", input(SIMULATED_FAILURE_FILENAME)).await;

        assert_eq!(row.status, models::FileStatus::Failed);
        assert!(row.created_at.is_some());
        assert!(assistants.uploaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_failure_becomes_error_row() {
        let assistants = MockAssistantsConnector::failing();
        let row = upload_one(&assistants, "token", input("notes.txt")).await;

        assert_eq!(row.status, models::FileStatus::Failed);
        assert_eq!(row.filename, "notes.txt");
        assert!(Uuid::parse_str(&row.id).is_ok());
    }

    #[tokio::test]
    async fn uploaded_file_is_complete() {
        let assistants = MockAssistantsConnector::default();
        let row = upload_one(&assistants, "token", input("notes.txt")).await;

        assert_eq!(row.status, models::FileStatus::Complete);
        assert_eq!(row.id, "file-1");
    }
}
