use actix_files::Files;
use actix_web::web;

use crate::config::Config;
use crate::database::Repository;

pub mod health;
pub mod projects;
pub mod swagger;
pub mod users;

#[cfg(test)]
pub mod test_support;

/// Registers shared state, the API routes and the upload file server.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    db: web::Data<dyn Repository>,
    config: web::Data<Config>,
) {
    let upload_dir = config.upload_dir.clone();

    cfg.app_data(db)
        .app_data(config)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/register", web::post().to(users::register))
                .route("/login", web::post().to(users::login))
                .route("/projects", web::post().to(projects::create_project))
                .route("/projects/{username}", web::get().to(projects::list_projects)),
        )
        .service(Files::new("/uploads", upload_dir));
}
