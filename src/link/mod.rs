//! Collaboration link generation
//!
//! A link points at the public Excalidraw app and carries the room and the
//! session key in the URL fragment, so neither reaches the server:
//!
//! `https://excalidraw.com/#room=<room id>,<key>`

mod ids;
mod random;

pub use ids::{CollabKey, RoomId, KEY_BYTES, ROOM_ID_BYTES};
pub use random::{OsRandom, SecureRandomSource};

use std::fmt;

use crate::error::Result;

/// Base URL of the whiteboard service
pub const EXCALIDRAW_URL: &str = "https://excalidraw.com/";

/// A generated collaboration link
#[derive(Debug, Clone)]
pub struct CollabLink {
    room_id: RoomId,
    key: CollabKey,
    url: String,
}

impl CollabLink {
    /// Generate a fresh room and key
    pub fn generate(rng: &dyn SecureRandomSource) -> Result<Self> {
        let room_id = RoomId::generate(rng)?;
        let key = CollabKey::generate(rng)?;
        Ok(Self::new(room_id, key))
    }

    pub fn new(room_id: RoomId, key: CollabKey) -> Self {
        let url = format!("{}#room={},{}", EXCALIDRAW_URL, room_id, key);
        Self { room_id, key, url }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn key(&self) -> &CollabKey {
        &self.key
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for CollabLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
