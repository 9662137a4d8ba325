use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ChatService;
use crate::views;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Get anonymous messages.", skip(query, chat))]
#[get("/anonymous/messages")]
pub async fn list_handler(
    query: web::Query<forms::SessionQuery>,
    chat: web::Data<ChatService>,
) -> Result<impl Responder> {
    let session_id = query.session_id().map_err(JsonResponse::form_error)?;

    let messages: Vec<views::Message> = chat
        .anonymous_messages(session_id)
        .await?
        .into_iter()
        .map(views::Message::from)
        .collect();

    Ok(web::Json(messages))
}
