use crate::middleware::authentication::Admin;
use crate::services::ChatService;
use crate::views;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Admin stats.", skip(admin, chat), fields(admin_id = admin.id))]
#[get("/admin/stats")]
pub async fn stats_handler(admin: Admin, chat: web::Data<ChatService>) -> Result<impl Responder> {
    let totals = chat.totals().await?;
    Ok(web::Json(views::Stats::from(totals)))
}
