//! Cryptographic primitives for note signing.
//!
//! Wraps Ed25519 signing with strong types.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entropy::EntropySource;
use crate::error::{DecodeError, Error, Result};

/// Length of an Ed25519 seed in bytes.
pub const SEED_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;

/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Signature algorithm of a note key.
///
/// Encoded key material is prefixed with the algorithm's one-byte identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Ed25519,
}

impl Algorithm {
    /// The wire identifier.
    pub const fn id(self) -> u8 {
        match self {
            Algorithm::Ed25519 => 0x01,
        }
    }

    /// Look up an algorithm by wire identifier.
    pub fn from_id(id: u8) -> std::result::Result<Self, DecodeError> {
        match id {
            0x01 => Ok(Algorithm::Ed25519),
            other => Err(DecodeError::UnknownAlgorithm(other)),
        }
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check that the bytes are a valid Ed25519 point.
    pub fn validate(&self) -> std::result::Result<(), DecodeError> {
        VerifyingKey::from_bytes(&self.0)
            .map(|_| ())
            .map_err(|_| DecodeError::InvalidPublicKey)
    }

    /// Report whether `signature` is a valid signature of `message`.
    ///
    /// Signatures of the wrong length are invalid rather than an error.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let Ok(sig) = Ed25519Signature::try_from(signature) else {
            return false;
        };
        verifying_key
            .verify(message, &Signature::from_bytes(&sig.0))
            .is_ok()
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Ed25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Ed25519Signature {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        let arr: [u8; 64] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// An Ed25519 signing keypair.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new keypair from a seed drawn from `source`.
    pub fn generate(source: &dyn EntropySource) -> Result<Self> {
        let mut seed = [0u8; SEED_LENGTH];
        source
            .fill(&mut seed)
            .map_err(|e| Error::EntropyUnavailable(e.to_string()))?;
        Ok(Self::from_seed(&seed))
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsEntropy;

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = Keypair::generate(&OsEntropy).unwrap();
        let message = b"hello world";
        let signature = keypair.sign(message);

        assert!(keypair.public_key().verify(message, signature.as_bytes()));

        // Tampered message should fail
        let tampered = b"hello worlD";
        assert!(!keypair.public_key().verify(tampered, signature.as_bytes()));
    }

    #[test]
    fn test_verify_rejects_short_signature() {
        let keypair = Keypair::from_seed(&[0x11; 32]);
        let signature = keypair.sign(b"msg");
        assert!(!keypair.public_key().verify(b"msg", &signature.as_bytes()[..63]));
        assert!(!keypair.public_key().verify(b"msg", &[]));
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.seed(), seed);
    }

    #[test]
    fn test_keypair_debug_hides_seed() {
        let seed = [0x42u8; 32];
        let kp = Keypair::from_seed(&seed);
        let debug = format!("{:?}", kp);
        assert!(debug.starts_with("Keypair(Ed25519Pub("));
        assert!(!debug.contains(&hex::encode(seed)[..16]));
    }

    #[test]
    fn test_algorithm_ids() {
        assert_eq!(Algorithm::Ed25519.id(), 1);
        assert_eq!(Algorithm::from_id(1).unwrap(), Algorithm::Ed25519);
        assert_eq!(
            Algorithm::from_id(2).unwrap_err(),
            DecodeError::UnknownAlgorithm(2)
        );
    }

    #[test]
    fn test_public_key_serde() {
        let pk = Keypair::from_seed(&[5; 32]).public_key();
        let json = serde_json::to_string(&pk).unwrap();
        let back: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }
}
