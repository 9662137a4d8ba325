use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::Authenticated;
use crate::services::ChatService;
use crate::views;
use actix_web::{post, web, Responder, Result};

#[tracing::instrument(
    name = "Send user message.",
    skip(user, form, chat),
    fields(user_id = user.id, model_id = %form.model_id)
)]
#[post("/messages")]
pub async fn add_handler(
    user: Authenticated,
    form: web::Json<forms::MessageForm>,
    chat: web::Data<ChatService>,
) -> Result<impl Responder> {
    if let Err(msg) = form.check() {
        return Err(JsonResponse::form_error(msg));
    }

    let reply = chat.send_user(&user, &form.content, &form.model_id).await?;
    Ok(web::Json(views::Message::from(reply)))
}
