use crate::configuration::AuthSettings;
use crate::middleware::authentication::get_header;
use crate::models;
use actix_web::dev::ServiceRequest;
use reqwest::header::ACCEPT;

fn try_extract_token(authentication: String) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some("Bearer") => {}
        _ => return Err("Bearer missing scheme".to_string()),
    }
    match authentication_parts.next() {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => {
            tracing::error!("Bearer token is missing");
            Err("Authentication required".to_string())
        }
    }
}

#[tracing::instrument(name = "Authenticate with bearer token", skip(req))]
pub async fn try_bearer(req: &mut ServiceRequest) -> Result<bool, String> {
    let authentication = match get_header::<String>(req, "authorization")? {
        Some(value) => value,
        None => return Ok(false),
    };

    let token = match try_extract_token(authentication) {
        Ok(token) => token,
        Err(err) => {
            tracing::debug!("Ignoring authorization header: {}", err);
            return Ok(false);
        }
    };

    super::authenticate_token(req, token).await
}

/// Ask the auth server who owns `token`.
pub async fn fetch_user(
    http_client: &reqwest::Client,
    auth: &AuthSettings,
    token: &str,
) -> Result<models::User, String> {
    let mut req = http_client
        .get(auth.user_url())
        .bearer_auth(token)
        .header(ACCEPT, "application/json");
    if let Some(key) = &auth.anon_key {
        req = req.header("apikey", key);
    }

    let resp = req
        .send()
        .await
        .map_err(|_err| "no resp from auth server".to_string())?;

    if !resp.status().is_success() {
        return Err("401 Unauthorized".to_string());
    }

    resp.json::<models::User>()
        .await
        .map_err(|_err| "can't parse the response body".to_string())
}
