pub mod collab;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod link;
pub mod settings;
pub mod vault;

pub use collab::{CollabRecorder, CollabRoom};
pub use config::Config;
pub use error::CollabError;
pub use host::{Clipboard, Clock, LinkOpener, Notice, NoticeKind, Notifier, OpenTarget};
pub use http::{create_router, AppState};
pub use link::{CollabKey, CollabLink, OsRandom, RoomId, SecureRandomSource};
pub use settings::{Settings, SettingsStore, DEFAULT_FOLDER_PATH};
pub use vault::{FileStore, Folder, FsStore, StoreError};
