use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Project Service API",
        version = "1.0.0",
        description = "Username registration, username existence checks, and project creation with file uploads.\n\n**Note:** there is no authentication; `/api/login` only reports whether a username was registered."
    ),
    paths(
        crate::api::users::register,
        crate::api::users::login,
        crate::api::projects::create_project,
        crate::api::projects::list_projects,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::UsernameRequest,
            crate::models::MessageResponse,
            crate::models::LoginResponse,
            crate::models::CreateProjectForm,
            crate::models::CreateProjectResponse,
            crate::models::ProjectResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Username registration and existence checks."),
        (name = "Projects", description = "Project creation with up to 5 uploaded files, and listing by owner. Uploaded files are served under /uploads."),
        (name = "Health", description = "Service and database status."),
    )
)]
pub struct ApiDoc;
