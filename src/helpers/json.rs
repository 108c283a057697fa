use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde::Serialize;
use serde_json::Value;

/// Envelope every JSON endpoint answers with.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) errors: Option<Value>,
}

#[derive(Debug)]
pub struct JsonResponseBuilder<T>
where
    T: Serialize,
{
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
    errors: Option<Value>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: Serialize,
{
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
            errors: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub(crate) fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub(crate) fn set_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub(crate) fn set_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    fn to_json_response(self, message: impl Into<String>) -> JsonResponse<T> {
        JsonResponse {
            message: message.into(),
            id: self.id,
            item: self.item,
            list: self.list,
            errors: self.errors,
        }
    }

    pub(crate) fn ok(self, message: impl Into<String>) -> web::Json<JsonResponse<T>> {
        web::Json(self.to_json_response(message))
    }

    fn error(self, status: StatusCode, message: impl Into<String>) -> Error {
        let message = message.into();
        let body = HttpResponse::build(status).json(self.to_json_response(message.clone()));
        InternalError::from_response(message, body).into()
    }

    pub(crate) fn bad_request(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    /// 400 carrying field-level validation messages.
    pub(crate) fn form_error(self, errors: Value) -> Error {
        self.set_errors(errors)
            .error(StatusCode::BAD_REQUEST, "Validation error")
    }

    pub(crate) fn unauthorized(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn not_found(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::CONFLICT, message)
    }

    pub(crate) fn internal_server_error(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl JsonResponse<Value> {
    pub(crate) fn unauthorized(message: impl Into<String>) -> Error {
        JsonResponse::<Value>::build().unauthorized(message)
    }

    pub(crate) fn internal_server_error(message: impl Into<String>) -> Error {
        JsonResponse::<Value>::build().internal_server_error(message)
    }
}
