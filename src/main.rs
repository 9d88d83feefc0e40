use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use excalidraw_collab::{create_router, AppState, CollabRecorder, Config, SettingsStore};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "excalidraw-collab", version, about = "Create Excalidraw collaboration rooms and record them in your vault")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/excalidraw-collab")]
    config: String,

    /// Vault root, overriding the configuration
    #[arg(long)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open Excalidraw Collaboration Room (default)
    Open,
    /// Serve the HTTP API
    Serve {
        /// Port, overriding the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Folder to save the Excalidraw collaboration links
    SetFolder { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut cfg = Config::load(&cli.config)?;
    if let Some(vault) = cli.vault {
        cfg.vault.path = vault;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Vault: {}", cfg.vault.path.display());

    let settings = SettingsStore::open(cfg.settings_path()).await?;
    info!("Settings: {}", settings.path().display());
    let recorder = CollabRecorder::system(cfg.vault.path.clone(), cfg.open.target);

    match cli.command.unwrap_or(Command::Open) {
        Command::Open => {
            let folder_path = settings.get().await.folder_path;
            let room = recorder.create_collaboration_link(&folder_path).await?;
            println!("{}", room.link);
            info!("Note: {}", room.note_path);
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(cfg.service.http.port);
            let addr = format!("{}:{}", cfg.service.http.bind, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            info!("HTTP server listening on {}", addr);
            let app = create_router(AppState::new(recorder, settings));
            axum::serve(listener, app).await.context("HTTP server failed")?;
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&settings.get().await)?);
            }
            SettingsAction::SetFolder { path } => {
                let updated = settings.set_folder_path(path).await?;
                println!("Folder path set to {:?}", updated.folder_path);
            }
        },
    }

    Ok(())
}
