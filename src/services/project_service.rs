use crate::{
    database::Repository,
    models::Project,
    services::upload_service::{self, ProjectForm},
    utils::AppError,
};

/// Persists a project for files already stored by the upload intake.
/// No duplicate check: the same owner may reuse a project name.
pub async fn create_project(db: &dyn Repository, form: ProjectForm) -> Result<Project, AppError> {
    let project = match Project::new(&form.username, &form.project_name, form.files) {
        Ok(project) => project,
        Err(e) => {
            upload_service::discard(&form.stored).await;
            return Err(e);
        }
    };

    db.insert_project(project).await
}

pub async fn list_projects(db: &dyn Repository, username: &str) -> Result<Vec<Project>, AppError> {
    db.find_projects(username).await
}
