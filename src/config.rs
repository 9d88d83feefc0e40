use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::host::OpenTarget;

/// Prefix for environment overrides, e.g. `EXCALIDRAW_COLLAB__VAULT__PATH`
pub const ENV_PREFIX: &str = "EXCALIDRAW_COLLAB";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub vault: VaultConfig,
    pub open: OpenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    /// Root directory of the notes vault
    pub path: PathBuf,
    /// Settings file; relative paths resolve against the vault root
    pub settings_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenConfig {
    pub target: OpenTarget,
}

impl Config {
    /// Load configuration: defaults, then the optional file at `path`
    /// (any extension the `config` crate understands), then environment
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "excalidraw-collab")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8787)?
            .set_default("vault.path", ".")?
            .set_default("vault.settings_file", ".excalidraw-collab/data.json")?
            .set_default("open.target", "browser")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Absolute or vault-relative location of the settings file
    pub fn settings_path(&self) -> PathBuf {
        if self.vault.settings_file.is_absolute() {
            self.vault.settings_file.clone()
        } else {
            self.vault.path.join(&self.vault.settings_file)
        }
    }
}
