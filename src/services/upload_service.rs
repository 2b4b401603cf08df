use actix_multipart::{Field, Multipart};
use chrono::Utc;
use futures::TryStreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{config::FileNaming, utils::AppError};

/// Files accepted per request.
pub const MAX_FILES: usize = 5;
/// Multipart field carrying the uploads.
pub const FILES_FIELD: &str = "files";
/// Largest accepted text field, in bytes.
pub const MAX_FIELD_SIZE: usize = 1024 * 1024;

/// Text fields and stored uploads read from a project creation form.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub username: String,
    pub project_name: String,
    /// Stored paths as recorded on the project, in upload order.
    pub files: Vec<String>,
    /// Same files as written on disk, for cleanup.
    pub stored: Vec<PathBuf>,
}

/// Reads the multipart stream, writing each `files` part to `dir` under a
/// generated name. Anything already written is removed if intake fails.
pub async fn read_project_form(
    mut payload: Multipart,
    dir: &Path,
    naming: FileNaming,
) -> Result<ProjectForm, AppError> {
    let mut form = ProjectForm::default();

    match read_fields(&mut payload, dir, naming, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            discard(&form.stored).await;
            Err(e)
        }
    }
}

async fn read_fields(
    payload: &mut Multipart,
    dir: &Path,
    naming: FileNaming,
    form: &mut ProjectForm,
) -> Result<(), AppError> {
    while let Some(field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match original_name {
            Some(original_name) => {
                if name != FILES_FIELD {
                    return Err(AppError::InvalidRequest(format!("Unexpected field: {}", name)));
                }
                if form.stored.len() == MAX_FILES {
                    return Err(AppError::InvalidRequest(format!(
                        "Too many files (max {})",
                        MAX_FILES
                    )));
                }

                let path = dir.join(generate_filename(&original_name, naming));
                // Registered before writing so a half-written file is cleaned up too.
                form.stored.push(path.clone());
                save_field(field, &path).await?;
                log::debug!("📎 Stored upload '{}' as {}", original_name, path.display());
                form.files.push(path.to_string_lossy().into_owned());
            }
            None => {
                let value = read_text(field).await?;
                match name.as_str() {
                    "username" => form.username = value,
                    "projectName" => form.project_name = value,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

async fn save_field(mut field: Field, path: &Path) -> Result<(), AppError> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

async fn read_text(mut field: Field) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > MAX_FIELD_SIZE {
            return Err(AppError::InvalidRequest(format!(
                "Form field too large (max {} bytes)",
                MAX_FIELD_SIZE
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes)
        .map_err(|_| AppError::InvalidRequest("Form fields must be valid UTF-8".to_string()))
}

fn malformed(e: actix_multipart::MultipartError) -> AppError {
    AppError::InvalidRequest(format!("Malformed multipart body: {}", e))
}

/// Best-effort removal of stored uploads.
pub async fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            log::warn!("⚠️  Could not remove upload {}: {}", path.display(), e);
        }
    }
}

/// On-disk name for an upload: millisecond timestamp plus the original
/// extension, with a random token in between unless timestamp naming is
/// configured.
pub fn generate_filename(original_name: &str, naming: FileNaming) -> String {
    let millis = Utc::now().timestamp_millis();
    let ext = extension(original_name);

    match naming {
        FileNaming::Timestamp => format!("{}{}", millis, ext),
        FileNaming::Unique => format!("{}-{}{}", millis, Uuid::new_v4().simple(), ext),
    }
}

/// Extension including the dot, or empty. Dotfiles have none.
fn extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
