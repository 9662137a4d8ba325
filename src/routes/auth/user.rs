use crate::middleware::authentication::Authenticated;
use crate::views;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Current user.", skip(user), fields(user_id = user.id))]
#[get("/user")]
pub async fn user_handler(user: Authenticated) -> Result<impl Responder> {
    Ok(web::Json(views::User::from(user.0.as_ref())))
}
