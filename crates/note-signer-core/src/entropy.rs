//! Entropy sources for key generation.
//!
//! Key generation takes its randomness as an explicit capability so callers
//! can inject a deterministic source in tests.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between concurrent callers.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely, or fail.
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

impl<R> EntropySource for Mutex<R>
where
    R: RngCore + CryptoRng + Send,
{
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        let mut rng = self
            .lock()
            .map_err(|_| rand::Error::new("entropy source lock poisoned"))?;
        rng.try_fill_bytes(dest)
    }
}
