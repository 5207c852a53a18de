//! Strong type definitions for note keys.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::crypto::{Algorithm, Ed25519PublicKey};
use crate::error::DecodeError;

/// A 32-bit key identifier, computed as
/// `SHA-256(name || "\n" || algorithm || public_key)[..4]` (big-endian).
///
/// Verifiers use the key ID to discard signatures from unknown keys before
/// doing any cryptographic work. A matching key ID says nothing about
/// whether the signature is valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId(pub u32);

impl KeyId {
    /// Create from a raw `u32`.
    pub const fn from_u32(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw `u32`.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Big-endian bytes, as they prefix a note signature.
    pub const fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Compute the key ID for a named public key.
    pub fn compute(name: &str, public_key: &Ed25519PublicKey) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
        hasher.update([Algorithm::Ed25519.id()]);
        hasher.update(public_key.as_bytes());
        let digest = hasher.finalize();

        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&digest[..4]);
        Self(u32::from_be_bytes(prefix))
    }

    /// Convert to an 8-digit lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Parse from an 8-digit lowercase hex string.
    ///
    /// Uppercase digits are rejected so that every accepted string
    /// re-encodes to itself.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let canonical = s.len() == 8
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !canonical {
            return Err(DecodeError::InvalidKeyId(s.to_string()));
        }
        let bytes = hex::decode(s).map_err(|_| DecodeError::InvalidKeyId(s.to_string()))?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(&bytes);
        Ok(Self(u32::from_be_bytes(arr)))
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.to_hex())
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl FromStr for KeyId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<u32> for KeyId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Reports whether `name` may name a note key.
///
/// Names must be non-empty and contain neither Unicode whitespace nor `+`,
/// both of which delimit fields in encoded keys and signature lines.
pub fn is_valid_key_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('+') && !name.chars().any(char::is_whitespace)
}
