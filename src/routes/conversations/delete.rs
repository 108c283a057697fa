use crate::db;
use crate::helpers::{JsonResponse, Session};
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// DELETE /api/conversations/delete/{id}
/// Messages go with the conversation.
#[tracing::instrument(name = "Delete conversation.", skip_all, fields(user_id = %session.id))]
#[delete("/delete/{id}")]
pub async fn item(
    session: Session,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::conversation::delete(pg_pool.get_ref(), id, &session.id)
        .await
        .map_err(|_err| {
            JsonResponse::<String>::build().internal_server_error("Error deleting conversation.")
        })
        .and_then(|deleted| match deleted {
            true => Ok(JsonResponse::<String>::build().set_id(id).ok("Deleted")),
            false => Err(JsonResponse::<String>::build().not_found("Conversation not found.")),
        })
}
