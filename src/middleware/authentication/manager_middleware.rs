use crate::helpers::JsonResponse;
use crate::middleware::authentication::method;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse},
    Error,
};
use futures::future::LocalBoxFuture;
use futures::task::{Context, Poll};
use std::cell::RefCell;
use std::rc::Rc;

pub struct ManagerMiddleware<S> {
    pub service: Rc<RefCell<S>>,
}

/// Tries each session source in turn; the first that accepts wins.
async fn resolve_session(req: &mut ServiceRequest) -> Result<(), String> {
    if method::try_bearer(req).await? {
        return Ok(());
    }
    if method::try_cookie(req).await? {
        return Ok(());
    }
    method::anonym(req).map(|_| ())
}

impl<S, B> Service<ServiceRequest> for ManagerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        match self.service.try_borrow_mut() {
            Ok(service) => service.poll_ready(ctx),
            Err(_) => Poll::Pending,
        }
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        Box::pin(async move {
            if let Err(msg) = resolve_session(&mut req).await {
                tracing::error!("Session resolution failed: {}", msg);
                return Err(JsonResponse::<String>::build().bad_request(msg));
            }

            let fut = service.borrow_mut().call(req);
            fut.await
        })
    }
}
