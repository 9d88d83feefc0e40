//! Note storage
//!
//! The recorder only needs three operations from the storage layer, all
//! taking vault-relative `/`-separated paths:
//! - `get_folder` to look up an entry
//! - `create_folder` to create a folder (and its parents)
//! - `create_file` to create a new note, failing if it exists

mod fs;

pub use fs::FsStore;

use thiserror::Error;

/// Storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// An entry already exists at the path
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A parent of the path does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Path is empty, absolute, or escapes the vault
    #[error("Invalid vault path: {0:?}")]
    InvalidPath(String),

    /// Any other I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An existing vault entry
///
/// Lookups do not distinguish folders from files, mirroring how the
/// recorder reuses whatever sits at the configured path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub path: String,
}

/// Storage capability used by the recorder
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Look up the entry at `path`
    async fn get_folder(&self, path: &str) -> Result<Option<Folder>, StoreError>;

    /// Create a folder at `path`
    ///
    /// Returns `StoreError::AlreadyExists` if an entry is already there.
    async fn create_folder(&self, path: &str) -> Result<(), StoreError>;

    /// Create a new file at `path` with `content`
    ///
    /// Returns `StoreError::AlreadyExists` if an entry is already there.
    async fn create_file(&self, path: &str, content: &str) -> Result<(), StoreError>;
}

/// Normalize a vault-relative path: drop empty segments and surrounding
/// slashes ("/Notes//Draw/" -> "Notes/Draw")
pub fn normalize_path(path: &str) -> String {
    path.trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
