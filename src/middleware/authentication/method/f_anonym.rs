use crate::middleware::authentication::Principal;
use actix_web::dev::ServiceRequest;
use actix_web::HttpMessage;

#[tracing::instrument(name = "authenticate as anonym", skip(req))]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    if req.extensions_mut().insert(Principal::Anonymous).is_some() {
        return Err("principal already set".to_string());
    }

    Ok(true)
}
