//! Collaboration room creation
//!
//! `CollabRecorder::create_collaboration_link` runs one linear sequence:
//! 1. Generate room id and key, assemble the link
//! 2. Ensure the target folder exists
//! 3. Create a uniquely named note holding the link
//! 4. Open the link, copy it, and notify the user (concurrently, best-effort)
//!
//! Failures in steps 1-3 abort the invocation and are reported to the user.
//! Failures in step 4 are logged and never undo the note.

mod note;
mod recorder;

pub use note::{note_content, note_file_name, NOTE_PREFIX, SUCCESS_MESSAGE};
pub use recorder::{CollabRecorder, CollabRoom};
