use crate::services::AuthService;
use actix_web::{post, web, HttpRequest, HttpResponse, Result};

#[tracing::instrument(name = "Logout.", skip(req, auth))]
#[post("/logout")]
pub async fn logout_handler(req: HttpRequest, auth: web::Data<AuthService>) -> Result<HttpResponse> {
    if let Some(cookie) = req.cookie(&auth.settings().cookie_name) {
        auth.logout(cookie.value()).await?;
    }

    super::with_cookie(HttpResponse::Ok().finish(), super::removal_cookie(auth.settings()))
}
