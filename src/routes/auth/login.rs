use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::AuthService;
use crate::views;
use actix_web::{post, web, HttpResponse, Result};
use serde_valid::Validate;

#[tracing::instrument(name = "Login.", skip(auth))]
#[post("/login")]
pub async fn login_handler(
    form: web::Json<forms::LoginForm>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::form_error(errors.to_string()));
    }

    let (user, session) = auth.login(&form.username, &form.password).await?;
    let response = HttpResponse::Ok().json(views::User::from(user));

    super::with_cookie(response, super::session_cookie(auth.settings(), &session))
}
