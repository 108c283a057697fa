use crate::configuration::Settings;
use crate::connectors::{AssistantsConnector, ObjectStorage};
use crate::forms::{self, AvatarChange};
use crate::helpers::{JsonResponse, Session};
use actix_web::{post, web, Responder, Result};
use serde_json::Value;
use std::sync::Arc;

/// POST /chat/assistants-management/edit/{id}
#[tracing::instrument(name = "Edit assistant.", skip_all, fields(user_id = %session.id))]
#[post("/edit/{id}")]
pub async fn edit(
    session: Session,
    path: web::Path<(String,)>,
    form: web::Json<forms::AssistantForm>,
    settings: web::Data<Settings>,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
    storage: web::Data<Arc<dyn ObjectStorage>>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    if let Err(errors) = form.check(settings.limits.max_avatar_size()) {
        tracing::debug!("Invalid data received {:?}", errors);
        return Err(JsonResponse::<Value>::build().form_error(Value::Object(errors)));
    }

    let token = session.access_token.clone().unwrap_or_default();
    let avatar = match form.avatar_change() {
        AvatarChange::Upload(file) => {
            let bytes = file.decode().map_err(|err| {
                tracing::error!("Failed to decode avatar: {}", err);
                JsonResponse::<Value>::internal_server_error("Error updating assistant avatar.")
            })?;
            let stored = storage
                .upload(&token, &id, &file.content_type, bytes, true)
                .await
                .map_err(|err| {
                    tracing::error!("Failed to upload avatar of {}: {}", id, err);
                    JsonResponse::<Value>::internal_server_error("Error updating assistant avatar.")
                })?;
            storage.public_url(&stored)
        }
        AvatarChange::Remove => {
            storage
                .remove(&token, &[id.clone()])
                .await
                .map_err(|err| {
                    tracing::error!("Failed to remove avatar of {}: {}", id, err);
                    JsonResponse::<Value>::internal_server_error("Error deleting avatar.")
                })?;
            String::new()
        }
        AvatarChange::Keep(url) => {
            // only the assistant's own stored avatar can be kept
            if url != storage.public_url(&id) {
                tracing::debug!("Rejected avatar url {} for {}", url, id);
                return Err(JsonResponse::<Value>::build().form_error(serde_json::json!({
                    "avatar": ["Avatar must be the assistant's current image."]
                })));
            }
            url
        }
    };

    let mut params = form.to_params(settings.current_model(), &session.id);
    if let Some(metadata) = params.metadata.as_mut() {
        metadata.avatar = avatar;
    }

    assistants
        .update_assistant(&token, &id, &params)
        .await
        .map_err(|err| {
            tracing::error!("Failed to update assistant {}: {}", id, err);
            JsonResponse::<Value>::internal_server_error("Error updating assistant.")
        })?;

    Ok(super::see_other())
}
