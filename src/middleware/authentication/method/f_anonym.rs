use actix_web::dev::ServiceRequest;

#[tracing::instrument(name = "authenticate as anonym", skip(req))]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    tracing::debug!("No session for {}", req.path());
    Ok(true)
}
