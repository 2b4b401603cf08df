use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use crate::config::Config;
use crate::database::Repository;
use crate::models::{CreateProjectForm, CreateProjectResponse, MessageResponse, Project, ProjectResponse};
use crate::services::{project_service, upload_service};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body(content = CreateProjectForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Project created", body = CreateProjectResponse),
        (status = 400, description = "Missing field or too many files", body = MessageResponse),
        (status = 500, description = "Failed to create project", body = MessageResponse)
    )
)]
pub async fn create_project(
    db: web::Data<dyn Repository>,
    config: web::Data<Config>,
    payload: Multipart,
) -> HttpResponse {
    log::info!("📁 POST /api/projects");

    match store_project(db.get_ref(), &config, payload).await {
        Ok(project) => {
            log::info!(
                "✅ Project '{}' created for {} with {} file(s)",
                project.project_name,
                project.username,
                project.files.len()
            );
            HttpResponse::Created().json(CreateProjectResponse {
                message: "Project created successfully!".to_string(),
                project: ProjectResponse::from(project),
            })
        }
        Err(e) => {
            log::error!("❌ Error creating project: {}", e);
            HttpResponse::build(e.status_code()).json(MessageResponse {
                message: e.client_message("Failed to create project").to_string(),
            })
        }
    }
}

async fn store_project(
    db: &dyn Repository,
    config: &Config,
    payload: Multipart,
) -> Result<Project, AppError> {
    let form =
        upload_service::read_project_form(payload, &config.upload_dir, config.file_naming).await?;
    project_service::create_project(db, form).await
}

#[utoipa::path(
    get,
    path = "/api/projects/{username}",
    tag = "Projects",
    params(
        ("username" = String, Path, description = "Owner of the projects")
    ),
    responses(
        (status = 200, description = "Projects of the user, possibly empty", body = [ProjectResponse]),
        (status = 500, description = "Failed to retrieve projects", body = MessageResponse)
    )
)]
pub async fn list_projects(db: web::Data<dyn Repository>, path: web::Path<String>) -> HttpResponse {
    let username = path.into_inner();
    log::info!("📋 GET /api/projects/{}", username);

    match project_service::list_projects(db.get_ref(), &username).await {
        Ok(projects) => {
            let projects: Vec<ProjectResponse> =
                projects.into_iter().map(ProjectResponse::from).collect();
            HttpResponse::Ok().json(projects)
        }
        Err(e) => {
            log::error!("❌ Error listing projects for {}: {}", username, e);
            HttpResponse::build(e.status_code()).json(MessageResponse {
                message: e.client_message("Failed to retrieve projects").to_string(),
            })
        }
    }
}
