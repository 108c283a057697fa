use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

/// The user the authentication middleware attached to this request.
/// Extraction fails with 401 when the request carries no valid session.
#[derive(Debug, Clone)]
pub struct Session(pub Arc<models::User>);

impl Deref for Session {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<Arc<models::User>>().cloned();
        ready(match user {
            Some(user) => Ok(Session(user)),
            None => Err(JsonResponse::<serde_json::Value>::unauthorized("Unauthorized")),
        })
    }
}
