use crate::configuration::Settings;
use actix_web::{dev::ServiceRequest, web};

#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let cookie_name = match req.app_data::<web::Data<Settings>>() {
        Some(settings) => settings.auth.cookie_name.clone(),
        None => return Ok(false),
    };

    let token = match req.cookie(&cookie_name) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Ok(false),
    };

    tracing::debug!("Found {} in cookies", cookie_name);
    super::authenticate_token(req, token).await
}
