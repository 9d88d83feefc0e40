use chrono::{DateTime, Utc};
use std::process::Stdio;
use std::io::Write;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use super::{Clipboard, Clock, LinkOpener, Notice, NoticeKind, Notifier, OpenTarget};
use crate::error::{CollabError, Result};

fn has_cli(name: &str) -> bool {
    let checker = if cfg!(target_os = "windows") { "where" } else { "which" };
    std::process::Command::new(checker)
        .arg(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Clipboard backed by the platform copy utility
///
/// macOS: `pbcopy`, Windows: `clip`, Linux: `wl-copy`, `xclip` or `xsel`
/// (first one found when the clipboard is constructed).
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: Option<(&'static str, &'static [&'static str])>,
}

impl SystemClipboard {
    /// Look up the copy utility; spawns `which`/`where`, so call it outside
    /// the async runtime's hot path
    pub fn new() -> Self {
        let program: Option<(&'static str, &'static [&'static str])> = if cfg!(target_os = "macos") {
            Some(("pbcopy", &[][..]))
        } else if cfg!(target_os = "windows") {
            Some(("clip", &[][..]))
        } else {
            [
                ("wl-copy", &[][..]),
                ("xclip", &["-selection", "clipboard"][..]),
                ("xsel", &["--clipboard", "--input"][..]),
            ]
            .into_iter()
            .find(|(name, _)| has_cli(name))
        };

        match program {
            Some((name, _)) => debug!("Using clipboard utility {}", name),
            None => warn!("No clipboard utility found; links will not be copied"),
        }

        Self { program }
    }

    /// Clipboard using an explicit utility, or none at all
    pub fn with_program(program: Option<(&'static str, &'static [&'static str])>) -> Self {
        Self { program }
    }

    fn command(&self) -> Option<Command> {
        self.program.map(|(name, args)| {
            let mut c = Command::new(name);
            c.args(args);
            c
        })
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut cmd = self
            .command()
            .ok_or_else(|| CollabError::Clipboard("No clipboard utility found".to_string()))?;

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CollabError::Clipboard(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| CollabError::Clipboard(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| CollabError::Clipboard(e.to_string()))?;

        if !status.success() {
            return Err(CollabError::Clipboard(format!(
                "clipboard utility exited with {}",
                status
            )));
        }

        debug!("Link copied to clipboard");
        Ok(())
    }
}

/// Opens links with the platform URL handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener {
    target: OpenTarget,
}

impl SystemOpener {
    pub fn new(target: OpenTarget) -> Self {
        Self { target }
    }

    /// URL actually handed to the platform for `url`
    pub fn target_url(&self, url: &str) -> String {
        match self.target {
            OpenTarget::Browser => url.to_string(),
            OpenTarget::Obsidian => {
                let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
                format!("obsidian://web-open?url={}", encoded)
            }
        }
    }

    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(url);
            c
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/c", "start", "", url]);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        }
    }
}

#[async_trait::async_trait]
impl LinkOpener for SystemOpener {
    async fn open(&self, url: &str) -> Result<()> {
        let target = self.target_url(url);

        Self::command(&target)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CollabError::ExternalOpen(e.to_string()))?;

        debug!("Opened {}", target);
        Ok(())
    }
}

/// Prints notices to the terminal and the log
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notice: &Notice) -> Result<()> {
        let written = match notice.kind {
            NoticeKind::Success => {
                info!("{}", notice.message);
                writeln!(std::io::stdout().lock(), "{}", notice.message)
            }
            NoticeKind::Failure => {
                error!("{}", notice.message);
                writeln!(std::io::stderr().lock(), "{}", notice.message)
            }
        };
        written.map_err(|e| CollabError::Notification(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
