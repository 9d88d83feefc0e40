use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::error::{CollabError, Result};

/// Source of cryptographically secure random bytes
///
/// Implementations:
/// - `OsRandom`: the operating system CSPRNG (getrandom)
/// - Test fakes returning fixed bytes
pub trait SecureRandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// Operating system random source
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CollabError::RandomSource(e.to_string()))
    }
}
