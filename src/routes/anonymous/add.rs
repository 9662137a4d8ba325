use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ChatService;
use crate::views;
use actix_web::{post, web, Responder, Result};

#[tracing::instrument(
    name = "Send anonymous message.",
    skip(query, form, chat),
    fields(model_id = %form.model_id)
)]
#[post("/anonymous/messages")]
pub async fn add_handler(
    query: web::Query<forms::SessionQuery>,
    form: web::Json<forms::MessageForm>,
    chat: web::Data<ChatService>,
) -> Result<impl Responder> {
    let session_id = query.session_id().map_err(JsonResponse::form_error)?;

    if let Err(msg) = form.check() {
        return Err(JsonResponse::form_error(msg));
    }

    let reply = chat
        .send_anonymous(session_id, &form.content, &form.model_id)
        .await?;

    Ok(web::Json(views::Message::from(reply)))
}
