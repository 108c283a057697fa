mod f_anonym;
mod f_bearer;
mod f_cookie;

pub use f_anonym::anonym;
pub use f_bearer::{fetch_user, try_bearer};
pub use f_cookie::try_cookie;

use crate::configuration::Settings;
use crate::middleware::authentication::SessionCache;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use std::sync::Arc;

/// Resolve `token` to a user and attach it to the request. A token the auth
/// server rejects leaves the request anonymous.
pub(crate) async fn authenticate_token(req: &mut ServiceRequest, token: String) -> Result<bool, String> {
    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or("settings are not configured")?
        .clone();
    let http_client = req
        .app_data::<web::Data<reqwest::Client>>()
        .ok_or("http client is not configured")?
        .clone();
    let cache = req
        .app_data::<web::Data<SessionCache>>()
        .ok_or("session cache is not configured")?
        .clone();

    let mut user = match cache.get(&token).await {
        Some(user) => user,
        None => match fetch_user(http_client.get_ref(), &settings.auth, &token).await {
            Ok(user) => {
                cache.insert(token.clone(), user.clone()).await;
                user
            }
            Err(err) => {
                tracing::debug!("Session token rejected: {}", err);
                return Ok(false);
            }
        },
    };

    // kept for calls made on the user's behalf
    user.access_token = Some(token);

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}
