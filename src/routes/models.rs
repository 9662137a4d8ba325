use crate::services::dispatcher::MODELS;
use crate::views;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "List models.")]
#[get("/models")]
pub async fn list_handler() -> Result<impl Responder> {
    let models: Vec<views::Model> = MODELS.iter().map(views::Model::from).collect();
    Ok(web::Json(models))
}
