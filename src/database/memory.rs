use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::Repository;
use crate::models::{Project, User};
use crate::utils::AppError;

/// In-process stand-in for MongoDB used by handler tests.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    projects: Mutex<Vec<Project>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Makes every subsequent call fail like an unreachable server.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("server selection timeout".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        self.check()?;
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn insert_project(&self, mut project: Project) -> Result<Project, AppError> {
        self.check()?;
        project.id = Some(ObjectId::new());
        self.projects.lock().await.push(project.clone());
        Ok(project)
    }

    async fn find_projects(&self, username: &str) -> Result<Vec<Project>, AppError> {
        self.check()?;
        let projects = self.projects.lock().await;
        Ok(projects
            .iter()
            .filter(|p| p.username == username)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}
