use crate::middleware::authentication::Principal;
use crate::services::{AuthError, AuthService};
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use std::sync::Arc;

/// Resolves the session cookie. A missing, unknown or expired session is not
/// an error here; the request continues as anonymous.
#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let auth = match req.app_data::<web::Data<AuthService>>() {
        Some(auth) => auth.clone(),
        None => return Ok(false),
    };

    let token = match req.cookie(&auth.settings().cookie_name) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Ok(false),
    };

    let user = match auth.authenticate(&token).await {
        Ok(user) => user,
        Err(AuthError::Unauthorized) => {
            tracing::debug!("Session cookie rejected");
            return Ok(false);
        }
        Err(err) => return Err(format!("{err:?}")),
    };

    if req
        .extensions_mut()
        .insert(Principal::User(Arc::new(user)))
        .is_some()
    {
        return Err("user already logged".to_string());
    }

    Ok(true)
}
