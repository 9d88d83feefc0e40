//! Error types for collaboration room creation

use thiserror::Error;

use crate::vault::StoreError;

/// Failures of a single `create_collaboration_link` invocation.
///
/// `RandomSource`, `FolderCreation` and `FileCreation` abort the invocation.
/// The remaining variants come from the trailing side effects and are only
/// logged.
#[derive(Error, Debug)]
pub enum CollabError {
    /// Secure random generation unavailable
    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    /// Folder could not be created (other than it already existing)
    #[error("Failed to create folder {path}: {source}")]
    FolderCreation {
        /// Vault-relative folder path
        path: String,
        /// Storage failure
        #[source]
        source: StoreError,
    },

    /// Note could not be created
    #[error("Failed to create note {path}: {source}")]
    FileCreation {
        /// Vault-relative note path
        path: String,
        /// Storage failure
        #[source]
        source: StoreError,
    },

    /// Clipboard write failed
    #[error("Failed to copy link to clipboard: {0}")]
    Clipboard(String),

    /// External-open call failed
    #[error("Failed to open link: {0}")]
    ExternalOpen(String),

    /// Notification could not be shown
    #[error("Failed to show notification: {0}")]
    Notification(String),
}

impl CollabError {
    /// Whether this error aborts the invocation
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::RandomSource(_) | Self::FolderCreation { .. } | Self::FileCreation { .. }
        )
    }
}

/// Result type alias for collaboration operations
pub type Result<T> = std::result::Result<T, CollabError>;
