use crate::connectors::{AssistantsConnector, ObjectStorage};
use crate::helpers::{JsonResponse, Session};
use actix_web::{delete, web, Responder, Result};
use std::sync::Arc;

/// DELETE /api/assistants/delete/{id}
/// A missing avatar object does not fail the request.
#[tracing::instrument(name = "Delete assistant.", skip_all, fields(user_id = %session.id))]
#[delete("/delete/{id}")]
pub async fn item(
    session: Session,
    path: web::Path<(String,)>,
    assistants: web::Data<Arc<dyn AssistantsConnector>>,
    storage: web::Data<Arc<dyn ObjectStorage>>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let token = session.access_token.clone().unwrap_or_default();

    assistants
        .delete_assistant(&token, &id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete assistant {}: {}", id, err);
            JsonResponse::<String>::build().internal_server_error("Error deleting assistant.")
        })?;

    if let Err(err) = storage.remove(&token, &[id.clone()]).await {
        tracing::warn!("Failed to remove avatar of {}: {}", id, err);
    }

    Ok(JsonResponse::<String>::build().set_id(id).ok("Deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::openai::MockAssistantsConnector;
    use crate::connectors::storage::MockObjectStorage;
    use crate::routes::test_support;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn storage_failure_does_not_fail_delete() {
        let assistants: Arc<dyn AssistantsConnector> = Arc::new(MockAssistantsConnector::default());
        let storage: Arc<dyn ObjectStorage> = Arc::new(MockObjectStorage::failing());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(assistants))
                .app_data(web::Data::new(storage))
                .service(web::scope("/api/assistants").service(item)),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/assistants/delete/asst_1")
            .to_request();
        test_support::login(&req);

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn anonymous_request_is_unauthorized() {
        let assistants: Arc<dyn AssistantsConnector> = Arc::new(MockAssistantsConnector::default());
        let storage: Arc<dyn ObjectStorage> = Arc::new(MockObjectStorage::default());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(assistants))
                .app_data(web::Data::new(storage))
                .service(web::scope("/api/assistants").service(item)),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/assistants/delete/asst_1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
