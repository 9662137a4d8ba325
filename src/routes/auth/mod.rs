mod login;
mod logout;
mod register;
mod user;

pub use login::*;
pub use logout::*;
pub use register::*;
pub use user::*;

use crate::configuration::AuthSettings;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{Error, HttpResponse};

fn session_cookie(settings: &AuthSettings, session: &models::UserSession) -> Cookie<'static> {
    Cookie::build(settings.cookie_name.clone(), session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookie)
        .max_age(Duration::seconds(settings.session_ttl_secs))
        .finish()
}

fn removal_cookie(settings: &AuthSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build(settings.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

fn with_cookie(mut response: HttpResponse, cookie: Cookie<'static>) -> Result<HttpResponse, Error> {
    response.add_cookie(&cookie).map_err(|err| {
        tracing::error!("Failed to set session cookie: {:?}", err);
        JsonResponse::internal_server_error("")
    })?;
    Ok(response)
}
