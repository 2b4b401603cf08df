use crate::{
    database::Repository,
    models::User,
    utils::AppError,
};

/// Registers `username` unless it is already taken.
pub async fn register(db: &dyn Repository, username: Option<&str>) -> Result<User, AppError> {
    let user = User::new(username.unwrap_or_default())?;

    if db.find_user(&user.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    // The unique index still reports a Conflict if a concurrent request won.
    db.insert_user(user).await
}

/// True when `username` was registered before. Proves nothing else.
/// A missing or empty username is simply not registered.
pub async fn username_exists(db: &dyn Repository, username: Option<&str>) -> Result<bool, AppError> {
    match username {
        Some(username) if !username.is_empty() => Ok(db.find_user(username).await?.is_some()),
        _ => Ok(false),
    }
}
