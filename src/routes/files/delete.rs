use crate::connectors::AssistantsConnector;
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use actix_web::{post, web, Responder, Result};
use serde_json::Value;
use serde_valid::Validate;
use std::sync::Arc;

/// POST /api/files/delete
#[tracing::instrument(name = "Delete files.", skip_all, fields(user_id = %session.id))]
#[post("/delete")]
pub async fn delete(
    session: Session,
    form: web::Json<forms::FilesCheckForm>,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid data received {}", errors);
        return Err(JsonResponse::<String>::build()
            .form_error(Value::Object(forms::field_errors(&errors))));
    }

    let token = session.access_token.clone().unwrap_or_default();
    let mut deleted = Vec::with_capacity(form.file_ids.len());
    for file_id in &form.file_ids {
        if let Err(err) = assistants.delete_file(&token, file_id).await {
            tracing::error!("Failed to delete file {}: {}", file_id, err);
            return Err(JsonResponse::<String>::build()
                .set_list(deleted)
                .internal_server_error("Error deleting files."));
        }
        deleted.push(file_id.clone());
    }

    Ok(JsonResponse::build().set_list(deleted).ok("Deleted"))
}
