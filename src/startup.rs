use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::repository::ChatRepository;
use crate::routes;
use crate::services::{AuthService, ChatService, ModelDispatcher, QuotaGuard};
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    repository: Arc<dyn ChatRepository>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let dispatcher = ModelDispatcher::from_config(&settings.connectors)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
    let quota = QuotaGuard::new(settings.quota.anonymous_message_limit);

    let chat = web::Data::new(ChatService::new(repository.clone(), dispatcher, quota));
    let auth = web::Data::new(AuthService::new(repository, settings.auth.clone()));

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match &err {
            error::JsonPayloadError::Deserialize(err) => format!("Invalid body: {}", err),
            _ => format!("Invalid body: {}", err),
        };
        JsonResponse::form_error(msg)
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Cors::permissive())
            .app_data(json_config.clone())
            .app_data(chat.clone())
            .app_data(auth.clone())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/api")
                    .service(routes::auth::register_handler)
                    .service(routes::auth::login_handler)
                    .service(routes::auth::logout_handler)
                    .service(routes::auth::user_handler)
                    .service(routes::message::list_handler)
                    .service(routes::message::add_handler)
                    .service(routes::anonymous::session_handler)
                    .service(routes::anonymous::list_handler)
                    .service(routes::anonymous::add_handler)
                    .service(routes::admin::stats_handler)
                    .service(routes::models::list_handler),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
