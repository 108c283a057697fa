use crate::configuration::Settings;
use crate::connectors;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

const JSON_LIMIT: usize = 2 * 1024 * 1024;

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = match &err {
                error::JsonPayloadError::Deserialize(err) => format!(
                    "Invalid JSON at line {}, column {}: {}",
                    err.line(),
                    err.column(),
                    err
                ),
                _ => err.to_string(),
            };
            tracing::debug!("Rejected request body: {}", message);
            crate::helpers::JsonResponse::<String>::build().bad_request(message)
        })
}

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let pg_pool = web::Data::new(pg_pool);

    let auth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(io_error)?;
    let auth_http_client = web::Data::new(auth_http_client);

    let session_cache = web::Data::new(middleware::authentication::SessionCache::new(
        Duration::from_secs(settings.auth.cache_ttl_secs),
    ));

    // external services behind trait objects so tests can swap them
    let assistants_connector = connectors::init_assistants(&settings.connectors).map_err(io_error)?;
    let storage_connector = connectors::init_storage(&settings.connectors).map_err(io_error)?;

    let settings = web::Data::new(settings);

    let default_json_config = json_config(JSON_LIMIT);
    // base64 file payloads need more room than the default
    let upload_json_config = json_config(settings.limits.json_body_limit());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/files")
                            .service(routes::files::list::list)
                            .service(routes::files::delete::delete),
                    )
                    .service(
                        web::scope("/conversations")
                            .service(routes::conversations::get::list)
                            .service(routes::conversations::add::add)
                            .service(routes::conversations::update::update_label)
                            .service(routes::conversations::delete::item),
                    )
                    .service(web::scope("/messages").service(routes::messages::add::add))
                    .service(
                        web::scope("/assistants")
                            .service(routes::assistants::get::list)
                            .service(routes::assistants::delete::item),
                    ),
            )
            .service(
                web::scope("/chat")
                    .service(
                        web::scope("/file-management")
                            .app_data(upload_json_config.clone())
                            .service(routes::files::upload::upload),
                    )
                    .service(
                        web::scope("/assistants-management")
                            .app_data(upload_json_config.clone())
                            .service(routes::assistants::add::add)
                            .service(routes::assistants::get::edit_form)
                            .service(routes::assistants::edit::edit),
                    ),
            )
            .app_data(default_json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(auth_http_client.clone())
            .app_data(session_cache.clone())
            .app_data(assistants_connector.clone())
            .app_data(storage_connector.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
