use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::note::{note_content, note_file_name, SUCCESS_MESSAGE};
use crate::error::{CollabError, Result};
use crate::host::{
    Clipboard, Clock, ConsoleNotifier, LinkOpener, Notice, Notifier, OpenTarget, SystemClipboard,
    SystemClock, SystemOpener,
};
use crate::link::{CollabLink, OsRandom, SecureRandomSource};
use crate::settings::DEFAULT_FOLDER_PATH;
use crate::vault::{normalize_path, FileStore, FsStore, StoreError};

/// Outcome of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollabRoom {
    /// 20 hex characters
    pub room_id: String,
    /// Full collaboration link
    pub link: String,
    /// Vault-relative path of the created note
    pub note_path: String,
}

/// Creates collaboration rooms and records them as notes
///
/// Each capability is injected, so the recorder holds no host state of its
/// own and may be shared across concurrent invocations.
#[derive(Clone)]
pub struct CollabRecorder {
    store: Arc<dyn FileStore>,
    clipboard: Arc<dyn Clipboard>,
    opener: Arc<dyn LinkOpener>,
    notifier: Arc<dyn Notifier>,
    rng: Arc<dyn SecureRandomSource>,
    clock: Arc<dyn Clock>,
}

impl CollabRecorder {
    /// Recorder with the OS random source and the system clock
    pub fn new(
        store: Arc<dyn FileStore>,
        clipboard: Arc<dyn Clipboard>,
        opener: Arc<dyn LinkOpener>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            clipboard,
            opener,
            notifier,
            rng: Arc::new(OsRandom),
            clock: Arc::new(SystemClock),
        }
    }

    /// Recorder writing into the vault at `vault_root`, using the platform
    /// clipboard, URL handler and console notifications
    pub fn system(vault_root: impl Into<PathBuf>, open_target: OpenTarget) -> Self {
        Self::new(
            Arc::new(FsStore::new(vault_root)),
            Arc::new(SystemClipboard::new()),
            Arc::new(SystemOpener::new(open_target)),
            Arc::new(ConsoleNotifier),
        )
    }

    pub fn with_random_source(mut self, rng: Arc<dyn SecureRandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create a collaboration room and record it in a new note under
    /// `folder_path`
    ///
    /// An empty `folder_path` falls back to the default folder.
    pub async fn create_collaboration_link(&self, folder_path: &str) -> Result<CollabRoom> {
        match self.record(folder_path).await {
            Ok((room, link)) => {
                info!("Created collaboration room {} in {}", room.room_id, room.note_path);
                self.announce(&link).await;
                Ok(room)
            }
            Err(e) => {
                error!("Failed to create collaboration room: {}", e);
                let notice = Notice::failure(format!("Failed to create collaboration room: {}", e));
                if let Err(notify_err) = self.notifier.notify(&notice).await {
                    warn!("{}", notify_err);
                }
                Err(e)
            }
        }
    }

    async fn record(&self, folder_path: &str) -> Result<(CollabRoom, CollabLink)> {
        let link = CollabLink::generate(self.rng.as_ref())?;

        let folder = match normalize_path(folder_path) {
            f if f.is_empty() => DEFAULT_FOLDER_PATH.to_string(),
            f => f,
        };
        self.ensure_folder(&folder).await?;

        let note_path = format!("{}/{}", folder, note_file_name(self.clock.now()));
        self.store
            .create_file(&note_path, &note_content(&link))
            .await
            .map_err(|source| CollabError::FileCreation {
                path: note_path.clone(),
                source,
            })?;

        let room = CollabRoom {
            room_id: link.room_id().to_string(),
            link: link.to_string(),
            note_path,
        };
        Ok((room, link))
    }

    /// Create `folder` unless something already sits at that path
    async fn ensure_folder(&self, folder: &str) -> Result<()> {
        let folder_error = |source: StoreError| CollabError::FolderCreation {
            path: folder.to_string(),
            source,
        };

        if self.store.get_folder(folder).await.map_err(folder_error)?.is_some() {
            debug!("Using existing folder {}", folder);
            return Ok(());
        }

        match self.store.create_folder(folder).await {
            Ok(()) => {
                info!("Created folder {}", folder);
                Ok(())
            }
            Err(StoreError::AlreadyExists(_)) => {
                debug!("Folder {} was created concurrently", folder);
                Ok(())
            }
            Err(source) => Err(folder_error(source)),
        }
    }

    /// Open, copy and notify; each effect is independent of the others
    async fn announce(&self, link: &CollabLink) {
        let success = Notice::success(SUCCESS_MESSAGE);
        let (opened, copied, notified) = tokio::join!(
            self.opener.open(link.as_str()),
            self.clipboard.write_text(link.as_str()),
            self.notifier.notify(&success),
        );

        for result in [opened, copied, notified] {
            if let Err(e) = result {
                warn!("{}", e);
            }
        }
    }
}
