use crate::configuration::Settings;
use crate::connectors::{AssistantsConnector, ObjectStorage};
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_json::Value;
use std::sync::Arc;

/// POST /chat/assistants-management/new
///
/// Creates the assistant first; the avatar is stored under the new assistant
/// id and its public URL written back into the metadata.
#[tracing::instrument(name = "Add assistant.", skip_all, fields(user_id = %session.id))]
#[post("/new")]
pub async fn add(
    session: Session,
    form: web::Json<forms::AssistantForm>,
    settings: web::Data<Settings>,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
    storage: web::Data<Arc<dyn ObjectStorage>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.check(settings.limits.max_avatar_size()) {
        tracing::debug!("Invalid data received {:?}", errors);
        return Err(JsonResponse::<Value>::build().form_error(Value::Object(errors)));
    }

    let token = session.access_token.clone().unwrap_or_default();
    let params = form.to_params(settings.current_model(), &session.id);

    let assistant = assistants
        .create_assistant(&token, &params)
        .await
        .map_err(|err| {
            tracing::error!("Failed to create assistant: {}", err);
            JsonResponse::<Value>::internal_server_error("Error creating assistant.")
        })?;

    if let Some(file) = form.avatar_file.as_ref() {
        let bytes = file.decode().map_err(|err| {
            tracing::error!("Failed to decode avatar: {}", err);
            JsonResponse::<Value>::internal_server_error("Error saving assistant avatar.")
        })?;

        let stored = storage
            .upload(&token, &assistant.id, &file.content_type, bytes, false)
            .await
            .map_err(|err| {
                tracing::error!("Failed to upload avatar of {}: {}", assistant.id, err);
                JsonResponse::<Value>::internal_server_error("Error saving assistant avatar.")
            })?;

        let metadata = models::AssistantMetadata {
            avatar: storage.public_url(&stored),
            ..params.metadata.clone().unwrap_or_default()
        };
        let update = models::AssistantParams {
            metadata: Some(metadata),
            ..Default::default()
        };
        assistants
            .update_assistant(&token, &assistant.id, &update)
            .await
            .map_err(|err| {
                tracing::error!("Failed to set avatar of {}: {}", assistant.id, err);
                JsonResponse::<Value>::internal_server_error("Error adding avatar to assistant.")
            })?;
    }

    Ok(super::see_other())
}
