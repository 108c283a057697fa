use crate::db;
use crate::helpers::{JsonResponse, Session};
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

/// GET /api/conversations
/// Conversations of the logged-in user, each with its messages.
#[tracing::instrument(name = "Get all conversations.", skip_all, fields(user_id = %session.id))]
#[get("")]
pub async fn list(session: Session, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::conversation::fetch_by_user(pg_pool.get_ref(), &session.id)
        .await
        .map(|conversations| {
            JsonResponse::<models::Conversation>::build()
                .set_list(conversations)
                .ok("OK")
        })
        .map_err(|_err| {
            JsonResponse::<models::Conversation>::build()
                .internal_server_error("Error fetching conversations.")
        })
}
