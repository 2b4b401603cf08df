use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::user::require;
use crate::utils::AppError;

/// Project as stored in MongoDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owning user. Not checked against the users collection.
    pub username: String,

    #[serde(rename = "projectName")]
    pub project_name: String,

    /// Server-local paths of the uploaded files, in upload order.
    #[serde(default)]
    pub files: Vec<String>,
}

impl Project {
    pub fn new(username: &str, project_name: &str, files: Vec<String>) -> Result<Self, AppError> {
        Ok(Self {
            id: None,
            username: require("username", username)?,
            project_name: require("projectName", project_name)?,
            files,
        })
    }
}

/// Project as returned to clients, with `_id` as a hex string.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(rename = "projectName")]
    pub project_name: String,
    pub files: Vec<String>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        ProjectResponse {
            id: project.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: project.username,
            project_name: project.project_name,
            files: project.files,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateProjectResponse {
    pub message: String,
    pub project: ProjectResponse,
}

/// Multipart form accepted by `POST /api/projects`. Documentation only; the
/// handler reads the stream field by field.
#[allow(dead_code)]
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProjectForm {
    pub username: String,
    #[serde(rename = "projectName")]
    pub project_name: String,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_project_name_rejected() {
        let err = Project::new("alice", "", vec![]).unwrap_err();
        assert!(err.to_string().contains("projectName"));
    }

    #[test]
    fn test_files_default_to_empty_when_absent() {
        let project: Project =
            serde_json::from_str(r#"{"username":"alice","projectName":"demo"}"#).unwrap();
        assert!(project.files.is_empty());
    }

    #[test]
    fn test_response_uses_hex_id() {
        let id = ObjectId::new();
        let mut project = Project::new("alice", "demo", vec!["uploads/1.png".into()]).unwrap();
        project.id = Some(id);

        let body = serde_json::to_value(ProjectResponse::from(project)).unwrap();
        assert_eq!(body["_id"], id.to_hex());
        assert_eq!(body["projectName"], "demo");
        assert_eq!(body["files"][0], "uploads/1.png");
    }
}
