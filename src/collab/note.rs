use chrono::{DateTime, SecondsFormat, Utc};

use crate::link::CollabLink;

/// Filename prefix of generated notes
pub const NOTE_PREFIX: &str = "ExcalidrawCollab-";

/// Shown after a room was created
pub const SUCCESS_MESSAGE: &str =
    "Excalidraw collaboration room opened in your browser and link copied to clipboard.";

/// Note body; downstream tooling parses this exact text
pub fn note_content(link: &CollabLink) -> String {
    format!(
        "# Excalidraw Collaboration Room\n\n[Open Collaboration Room]({})",
        link
    )
}

/// `ExcalidrawCollab-<ISO-8601 UTC>.md` with `:` and `.` replaced by `-`
pub fn note_file_name(now: DateTime<Utc>) -> String {
    let timestamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}{}.md", NOTE_PREFIX, timestamp)
}
