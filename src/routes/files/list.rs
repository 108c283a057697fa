use crate::connectors::AssistantsConnector;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

/// GET /api/files
#[tracing::instrument(name = "List files.", skip_all, fields(user_id = %session.id))]
#[get("")]
pub async fn list(
    session: Session,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
) -> Result<impl Responder> {
    let token = session.access_token.clone().unwrap_or_default();
    assistants
        .list_files(&token)
        .await
        .map(|files| JsonResponse::<models::FileObject>::build().set_list(files).ok("OK"))
        .map_err(|err| {
            tracing::error!("Failed to list files: {}", err);
            JsonResponse::<models::FileObject>::build().internal_server_error("Error fetching files.")
        })
}
