use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::models::{Project, User};
use crate::utils::AppError;

#[cfg(test)]
pub mod memory;

pub const USERS_COLLECTION: &str = "skai_Lama_users";
pub const PROJECTS_COLLECTION: &str = "skai_Lama_users_Project";

const DEFAULT_DATABASE: &str = "test";
const DUPLICATE_KEY: i32 = 11000;

/// Storage operations the handlers need. Each call is a single document read
/// or write (or a single query).
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::Conflict` when the username is already taken.
    async fn insert_user(&self, user: User) -> Result<User, AppError>;

    async fn insert_project(&self, project: Project) -> Result<Project, AppError>;

    /// Projects owned by `username`, oldest first.
    async fn find_projects(&self, username: &str) -> Result<Vec<Project>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Connects to MongoDB, or falls back to a repository that fails every call
/// when no client can be built (bad URI, SRV lookup failure). Either way the
/// service starts and requests report 500 until the database is usable.
pub async fn connect(uri: &str, database: Option<&str>) -> Arc<dyn Repository> {
    match MongoDB::connect(uri, database).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("❌ Error connecting to MongoDB: {}", e);
            Arc::new(Unavailable {
                reason: e.to_string(),
            })
        }
    }
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
    indexes: Arc<OnceCell<()>>,
}

impl MongoDB {
    /// Builds the client. Only an unusable URI is an error here; an
    /// unreachable server is logged and the handle is returned anyway.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = database
            .map(str::to_string)
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);
        let mongodb = Self {
            db,
            indexes: Arc::new(OnceCell::new()),
        };

        match mongodb.ping().await {
            Ok(()) => {
                log::info!("✅ Connected to MongoDB database: {}", db_name);
                mongodb.ensure_indexes_once().await;
            }
            Err(e) => log::error!("❌ Error connecting to MongoDB: {}", e),
        }

        Ok(mongodb)
    }

    /// Creates the indexes on the first call that reaches the server; later
    /// calls are no-ops. A failed attempt is retried next time.
    async fn ensure_indexes_once(&self) {
        if let Err(e) = self.indexes.get_or_try_init(|| self.ensure_indexes()).await {
            log::warn!("⚠️  Database indexes not ready: {}", e);
        }
    }

    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let username_unique = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users().create_index(username_unique).await?;
        log::info!("   ✅ Index created: {}(username, unique)", USERS_COLLECTION);

        let projects_by_user = IndexModel::builder().keys(doc! { "username": 1 }).build();

        match self.projects().create_index(projects_by_user).await {
            Ok(_) => log::info!("   ✅ Index created: {}(username)", PROJECTS_COLLECTION),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }

    fn projects(&self) -> Collection<Project> {
        self.db.collection(PROJECTS_COLLECTION)
    }
}

#[async_trait]
impl Repository for MongoDB {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "username": username }).await?)
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        self.ensure_indexes_once().await;

        match self.users().insert_one(&user).await {
            Ok(result) => {
                user.id = result.inserted_id.as_object_id();
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => {
                Err(AppError::Conflict("Username already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_project(&self, mut project: Project) -> Result<Project, AppError> {
        let result = self.projects().insert_one(&project).await?;
        project.id = result.inserted_id.as_object_id();
        Ok(project)
    }

    async fn find_projects(&self, username: &str) -> Result<Vec<Project>, AppError> {
        let cursor = self
            .projects()
            .find(doc! { "username": username })
            .sort(doc! { "_id": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Stand-in used when no MongoDB client could be built.
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    fn error(&self) -> AppError {
        AppError::DatabaseError(format!("database unavailable: {}", self.reason))
    }
}

#[async_trait]
impl Repository for Unavailable {
    async fn find_user(&self, _username: &str) -> Result<Option<User>, AppError> {
        Err(self.error())
    }

    async fn insert_user(&self, _user: User) -> Result<User, AppError> {
        Err(self.error())
    }

    async fn insert_project(&self, _project: Project) -> Result<Project, AppError> {
        Err(self.error())
    }

    async fn find_projects(&self, _username: &str) -> Result<Vec<Project>, AppError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(self.error())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}
