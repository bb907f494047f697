use std::sync::Arc;

use actix_web::middleware::{DefaultHeaders, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod browser;
mod config;
mod docs;
mod error;
mod model;
mod models;
mod portal;
mod routes;

use browser::{Automation, BrowserManager};
use config::Config;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Portal attendance service is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env().map_err(|e| std::io::Error::other(format!("{e:#}")))?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let limiter = routes::attendance_limiter(config.rate_attendance_per_min)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    // launched lazily by the first request, shared by all workers
    let browser = Arc::new(BrowserManager::new(config.browser_settings()));
    let automation: Arc<dyn Automation> = browser.clone();
    let automation = Data::from(automation);

    let server_addr = config.server_addr.clone();
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(automation.clone())
            .app_data(config.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, limiter.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    browser.shutdown().await;
    info!("Server stopped");
    Ok(())
}
