use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Folder used when none is configured
pub const DEFAULT_FOLDER_PATH: &str = "Excalidraw";

/// Persisted plugin settings
///
/// Stored as JSON (`{"folderPath": "..."}`). Keys missing from the stored
/// object keep their defaults, as do `null` values; unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Vault folder that receives collaboration notes
    #[serde(deserialize_with = "folder_path_or_default")]
    pub folder_path: String,
}

fn folder_path_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_FOLDER_PATH.to_string()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder_path: DEFAULT_FOLDER_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, merging stored values over the defaults
    ///
    /// A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read settings {}", path.display()))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings {}", path.display()))
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create settings directory")?;
        }

        // The settings file is only ever replaced whole, never truncated
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("Failed to write settings {}", tmp_path.display()))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
            if let Err(remove_err) = tokio::fs::remove_file(&tmp_path).await {
                warn!("Failed to remove {}: {}", tmp_path.display(), remove_err);
            }
            return Err(e).with_context(|| format!("Failed to replace settings {}", path.display()));
        }

        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Settings bound to their file; every change is written immediately
pub struct SettingsStore {
    path: PathBuf,
    settings: RwLock<Settings>,
}

impl SettingsStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Settings::load(&path).await?;
        info!("Loaded settings from {} (folder: {})", path.display(), settings.folder_path);

        Ok(Self {
            path,
            settings: RwLock::new(settings),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current settings
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Update the note folder and persist
    pub async fn set_folder_path(&self, folder_path: impl Into<String>) -> Result<Settings> {
        let mut settings = self.settings.write().await;
        let mut updated = settings.clone();
        updated.folder_path = folder_path.into();
        updated.save(&self.path).await?;
        *settings = updated.clone();

        info!("Folder path set to {:?}", updated.folder_path);
        Ok(updated)
    }
}
