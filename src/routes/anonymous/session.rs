use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ChatService;
use crate::views;
use actix_web::{get, web, Responder, Result};

/// Creates the session on first sight so the client can show its quota.
#[tracing::instrument(name = "Get anonymous session.", skip(query, chat))]
#[get("/anonymous/session")]
pub async fn session_handler(
    query: web::Query<forms::SessionQuery>,
    chat: web::Data<ChatService>,
) -> Result<impl Responder> {
    let session_id = query.session_id().map_err(JsonResponse::form_error)?;

    let session = chat.anonymous_session(session_id).await?;
    Ok(web::Json(views::AnonymousSession::new(session, chat.quota())))
}
