use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::AuthService;
use crate::views;
use actix_web::{post, web, HttpResponse, Result};
use serde_valid::Validate;

#[tracing::instrument(name = "Register user.", skip(auth))]
#[post("/register")]
pub async fn register_handler(
    form: web::Json<forms::RegisterForm>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::form_error(errors.to_string()));
    }

    let (user, session) = auth.register(&form.username, &form.password).await?;
    let response = HttpResponse::Created().json(views::User::from(user));

    super::with_cookie(response, super::session_cookie(auth.settings(), &session))
}
