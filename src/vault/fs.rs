use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::{FileStore, Folder, StoreError};

/// Filesystem-backed store rooted at a vault directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault-relative path onto the filesystem
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        if path.starts_with('/') || path.contains('\\') {
            return Err(StoreError::InvalidPath(path.to_string()));
        }

        let mut resolved = self.root.clone();
        let mut segments = 0;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(StoreError::InvalidPath(path.to_string()));
            }
            resolved.push(segment);
            segments += 1;
        }

        if segments == 0 {
            return Err(StoreError::InvalidPath(path.to_string()));
        }

        Ok(resolved)
    }
}

fn io_error(path: &str, source: std::io::Error) -> StoreError {
    match source.kind() {
        ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_string()),
        ErrorKind::NotFound => StoreError::NotFound(path.to_string()),
        _ => StoreError::Io {
            path: path.to_string(),
            source,
        },
    }
}

#[async_trait::async_trait]
impl FileStore for FsStore {
    async fn get_folder(&self, path: &str) -> Result<Option<Folder>, StoreError> {
        let full = self.resolve(path)?;

        match fs::symlink_metadata(&full).await {
            Ok(_) => Ok(Some(Folder {
                path: path.to_string(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(path, e)),
        }
    }

    async fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;

        if fs::try_exists(&full).await.map_err(|e| io_error(path, e))? {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }

        fs::create_dir_all(&full)
            .await
            .map_err(|e| io_error(path, e))?;

        info!("Created folder: {}", full.display());
        Ok(())
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
            .map_err(|e| io_error(path, e))?;

        let written = async {
            file.write_all(content.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            // Don't leave a truncated note behind
            if let Err(remove_err) = fs::remove_file(&full).await {
                warn!("Failed to remove partial file {}: {}", full.display(), remove_err);
            }
            return Err(io_error(path, e));
        }

        debug!("Wrote {} bytes to {}", content.len(), full.display());
        Ok(())
    }
}
