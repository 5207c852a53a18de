//! Error types for note signing.

use std::fmt;

use thiserror::Error;

use crate::types::KeyId;

/// Reasons an encoded key string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing PRIVATE+KEY+ prefix")]
    MissingPrefix,

    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("invalid key name {0:?}")]
    InvalidName(String),

    #[error("invalid key id {0:?}: expected 8 lowercase hex digits")]
    InvalidKeyId(String),

    #[error("invalid base64 key data")]
    InvalidBase64,

    #[error("unknown key algorithm {0:#04x}")]
    UnknownAlgorithm(u8),

    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("key id mismatch: encoded {encoded}, computed {computed}")]
    KeyIdMismatch { encoded: KeyId, computed: KeyId },
}

/// A `<name>+<keyid>` pair naming a key seen in a signed note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyRef {
    pub name: String,
    pub id: KeyId,
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.name, self.id)
    }
}

/// Errors raised by key generation, signing and verification.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid key name {0:?}: must be non-empty without whitespace or '+'")]
    InvalidName(String),

    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("malformed private key: {0}")]
    MalformedKey(#[source] DecodeError),

    #[error("invalid note text: {0}")]
    InvalidNoteText(String),

    #[error("malformed signed note: {0}")]
    MalformedSignedNote(String),

    #[error("no valid signature (unknown keys: [{}], failed keys: [{}])", join(.unknown), join(.failed))]
    NoValidSignature {
        /// Signatures whose key id matched no known verifier.
        unknown: Vec<KeyRef>,
        /// Signatures whose key was known but did not verify.
        failed: Vec<KeyRef>,
    },

    #[error("signature name {signature_name:?} does not match key {key_name:?} for key id {id}")]
    NameMismatch {
        signature_name: String,
        key_name: String,
        id: KeyId,
    },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

fn join(refs: &[KeyRef]) -> String {
    refs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for note signing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_valid_signature_lists_keys() {
        let err = Error::NoValidSignature {
            unknown: vec![KeyRef {
                name: "alice".into(),
                id: KeyId::from_u32(0x0102_0304),
            }],
            failed: vec![KeyRef {
                name: "bob".into(),
                id: KeyId::from_u32(0xdead_beef),
            }],
        };
        assert_eq!(
            err.to_string(),
            "no valid signature (unknown keys: [alice+01020304], failed keys: [bob+deadbeef])"
        );
    }

    #[test]
    fn test_malformed_key_keeps_source() {
        let err = Error::MalformedKey(DecodeError::MissingPrefix);
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "missing PRIVATE+KEY+ prefix");
    }
}
