use crate::db::{self, DbError};
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_json::Value;
use serde_valid::Validate;
use sqlx::PgPool;

/// POST /api/messages/new
/// The target conversation must exist and belong to the caller.
#[tracing::instrument(name = "Add message.", skip_all, fields(user_id = %session.id))]
#[post("/new")]
pub async fn add(
    session: Session,
    form: web::Json<forms::NewMessageForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid data received {}", errors);
        return Err(JsonResponse::<models::Message>::build()
            .form_error(Value::Object(forms::field_errors(&errors))));
    }

    db::conversation::fetch(pg_pool.get_ref(), form.conversation_id, &session.id)
        .await
        .map_err(|_err| {
            JsonResponse::<models::Message>::build().internal_server_error("Error saving message.")
        })?
        .ok_or_else(|| JsonResponse::<models::Message>::build().not_found("Conversation not found."))?;

    let message = form.into_inner().into_model(&session.id);
    db::message::insert(pg_pool.get_ref(), message)
        .await
        .map(|message| {
            JsonResponse::build()
                .set_id(message.id)
                .set_item(message)
                .ok("OK")
        })
        .map_err(|err| match err {
            DbError::Conflict => {
                JsonResponse::<models::Message>::build().conflict("Message already exists.")
            }
            DbError::Query(_) => {
                JsonResponse::<models::Message>::build().internal_server_error("Error saving message.")
            }
        })
}
