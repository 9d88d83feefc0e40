use aes_gcm::{Aes128Gcm, Key, KeyInit};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt;

use super::random::SecureRandomSource;
use crate::error::Result;

/// Number of random bytes in a room identifier
pub const ROOM_ID_BYTES: usize = 10;

/// Key size in bytes (AES-128)
pub const KEY_BYTES: usize = 16;

/// Room identifier: 10 random bytes as 20 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn generate(rng: &dyn SecureRandomSource) -> Result<Self> {
        let mut bytes = [0u8; ROOM_ID_BYTES];
        rng.fill_bytes(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8; ROOM_ID_BYTES]) -> Self {
        Self(to_hex(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 128-bit AES-GCM key, exported as base64url without padding
/// (the JWK `k` member)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabKey {
    material: [u8; KEY_BYTES],
    encoded: String,
}

impl CollabKey {
    pub fn generate(rng: &dyn SecureRandomSource) -> Result<Self> {
        let mut material = [0u8; KEY_BYTES];
        rng.fill_bytes(&mut material)?;
        Ok(Self::from_bytes(material))
    }

    pub fn from_bytes(material: [u8; KEY_BYTES]) -> Self {
        let encoded = URL_SAFE_NO_PAD.encode(material);
        Self { material, encoded }
    }

    /// Encoded key as it appears in the link fragment
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Cipher for this key, as the whiteboard client would construct it
    pub fn cipher(&self) -> Aes128Gcm {
        Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(&self.material))
    }
}

impl fmt::Display for CollabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
