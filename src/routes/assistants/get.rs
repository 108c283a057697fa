use crate::connectors::AssistantsConnector;
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

/// GET /api/assistants
#[tracing::instrument(name = "Get all assistants.", skip_all, fields(user_id = %session.id))]
#[get("")]
pub async fn list(
    session: Session,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
) -> Result<impl Responder> {
    let token = session.access_token.clone().unwrap_or_default();
    assistants
        .list_assistants(&token)
        .await
        .map(|list| JsonResponse::build().set_list(list).ok("OK"))
        .map_err(|err| {
            tracing::error!("Failed to list assistants: {}", err);
            JsonResponse::<models::Assistant>::build()
                .internal_server_error("Error fetching assistants.")
        })
}

/// GET /chat/assistants-management/edit/{id}
/// Form data for the edit page, with the current avatar URL in `avatar`.
#[tracing::instrument(name = "Load assistant for edit.", skip_all, fields(user_id = %session.id))]
#[get("/edit/{id}")]
pub async fn edit_form(
    session: Session,
    path: web::Path<(String,)>,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let token = session.access_token.clone().unwrap_or_default();

    let assistant = assistants
        .retrieve_assistant(&token, &id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch assistant {}: {}", id, err);
            JsonResponse::<forms::AssistantForm>::build()
                .internal_server_error("Error fetching assistant.")
        })?
        .ok_or_else(|| {
            JsonResponse::<forms::AssistantForm>::build().not_found("Assistant not found.")
        })?;

    Ok(JsonResponse::build()
        .set_id(&assistant.id)
        .set_item(forms::AssistantForm::from(assistant))
        .ok("OK"))
}
