use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{put, web, Responder, Result};
use serde_json::Value;
use serde_valid::Validate;
use sqlx::PgPool;

/// PUT /api/conversations/update/label
#[tracing::instrument(name = "Update conversation label.", skip_all, fields(user_id = %session.id))]
#[put("/update/label")]
pub async fn update_label(
    session: Session,
    form: web::Json<forms::UpdateLabelForm>,
    settings: web::Data<Settings>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<String>::build()
            .form_error(Value::Object(forms::field_errors(&errors))));
    }

    let label = models::truncate_label(&form.label, settings.limits.max_label_size);
    db::conversation::update_label(pg_pool.get_ref(), form.id, &session.id, &label)
        .await
        .map_err(|_err| {
            JsonResponse::<String>::build().internal_server_error("Error updating conversation.")
        })
        .and_then(|updated| match updated {
            true => Ok(JsonResponse::build().set_id(form.id).set_item(label).ok("Updated")),
            false => Err(JsonResponse::<String>::build().not_found("Conversation not found.")),
        })
}
