use crate::configuration::Settings;
use crate::db::{self, DbError};
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_json::Value;
use serde_valid::Validate;
use sqlx::PgPool;

/// POST /api/conversations/new
#[tracing::instrument(name = "Add conversation.", skip_all, fields(user_id = %session.id))]
#[post("/new")]
pub async fn add(
    session: Session,
    form: web::Json<forms::NewConversationForm>,
    settings: web::Data<Settings>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid data received {}", errors);
        return Err(JsonResponse::<models::Conversation>::build()
            .form_error(Value::Object(forms::field_errors(&errors))));
    }

    let conversation = form
        .into_inner()
        .into_model(&session.id, settings.limits.max_label_size);

    db::conversation::insert(pg_pool.get_ref(), conversation)
        .await
        .map(|conversation| {
            JsonResponse::build()
                .set_id(conversation.id)
                .set_item(conversation)
                .ok("OK")
        })
        .map_err(|err| match err {
            DbError::Conflict => JsonResponse::<models::Conversation>::build()
                .conflict("Conversation already exists."),
            DbError::Query(_) => JsonResponse::<models::Conversation>::build()
                .internal_server_error("Error creating conversation."),
        })
}
