mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, FileNaming};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting Project Service...");
    log::info!("📂 Upload directory: {}", config.upload_dir.display());
    if config.file_naming == FileNaming::Timestamp {
        log::warn!("⚠️  Timestamp file naming: uploads in the same millisecond may overwrite each other");
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Connection failures are logged; requests fail with 500 until MongoDB is reachable.
    let repository = database::connect(&config.mongo_uri, config.mongo_database.as_deref()).await;
    let db_data = web::Data::from(repository);
    let config_data = web::Data::new(config.clone());

    log::info!("🌐 Server running on http://{}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();
        let db_data = db_data.clone();
        let config_data = config_data.clone();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(move |cfg| api::configure(cfg, db_data, config_data))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
