use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Registered user. The username is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
}

impl User {
    pub fn new(username: &str) -> Result<Self, AppError> {
        Ok(Self {
            id: None,
            username: require("username", username)?,
        })
    }
}

/// Body of `POST /api/register` and `POST /api/login`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UsernameRequest {
    pub username: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub username_exists: bool,
}

/// Presence check shared by the model constructors.
pub(crate) fn require(field: &str, value: &str) -> Result<String, AppError> {
    if value.is_empty() {
        return Err(AppError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
