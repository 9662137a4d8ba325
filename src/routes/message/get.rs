use crate::middleware::authentication::Authenticated;
use crate::services::ChatService;
use crate::views;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Get user messages.", skip(user, chat), fields(user_id = user.id))]
#[get("/messages")]
pub async fn list_handler(
    user: Authenticated,
    chat: web::Data<ChatService>,
) -> Result<impl Responder> {
    let messages: Vec<views::Message> = chat
        .user_messages(user.id)
        .await?
        .into_iter()
        .map(views::Message::from)
        .collect();

    Ok(web::Json(messages))
}
