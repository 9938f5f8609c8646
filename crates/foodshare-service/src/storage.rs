//! Local file storage for listing images
//!
//! Uploaded images are persisted under the configured upload directory with
//! generated filenames; the relative URL path is what gets stored on the
//! listing and served back statically.

use std::path::{Path, PathBuf};

use foodshare_common::AppError;
use tracing::instrument;
use uuid::Uuid;

/// One uploaded image: the client filename (for its extension) and the bytes
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Writes listing images to the local upload directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    upload_dir: PathBuf,
    max_file_size: usize,
}

impl ImageStore {
    /// Create a store rooted at `upload_dir`, rejecting files over
    /// `max_file_size_mb` megabytes
    pub fn new(upload_dir: impl Into<PathBuf>, max_file_size_mb: u32) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            max_file_size: max_file_size_mb as usize * 1024 * 1024,
        }
    }

    /// Persist one image and return its relative URL path (`/uploads/<name>`)
    ///
    /// # Errors
    /// Returns a storage error if the file is too large or the write fails
    #[instrument(skip(self, upload), fields(filename = %upload.filename))]
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, AppError> {
        if upload.bytes.is_empty() {
            return Err(AppError::Storage("empty image upload".to_string()));
        }
        if upload.bytes.len() > self.max_file_size {
            return Err(AppError::Storage(format!(
                "image exceeds maximum size of {} bytes",
                self.max_file_size
            )));
        }

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let stored_name = match extension_of(&upload.filename) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let path = self.upload_dir.join(&stored_name);
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(format!("/uploads/{stored_name}"))
    }

    /// Root directory served at `/uploads`
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(char::is_alphanumeric))
}
