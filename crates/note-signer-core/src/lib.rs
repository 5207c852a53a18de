//! # Note Signer Core
//!
//! Pure primitives for signed notes: named Ed25519 keys, key IDs, the
//! signed-note text format, signing and verification.
//!
//! This crate contains no I/O apart from drawing entropy for new keys.
//!
//! ## Key Types
//!
//! - [`NoteKeyPair`] - An Ed25519 keypair bound to a key name
//! - [`VerifierKey`] - The public half: name, key ID and public key
//! - [`KeyId`] - 32-bit key fingerprint used to match signatures to keys
//! - [`Note`] / [`SignedNote`] - Note text and its signature lines
//!
//! ## Encodings
//!
//! ```text
//! PRIVATE+KEY+<name>+<keyid>+<base64(0x01 || seed)>
//! <name>+<keyid>+<base64(0x01 || public key)>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use note_signer_core::{generate_key, sign_text, verify};
//!
//! let (private_key, public_key) = generate_key("test-key").unwrap();
//! let signed = sign_text("test message\n", &[&private_key]).unwrap();
//! let opened = verify(&signed.encode(), &[&public_key]).unwrap();
//! assert_eq!(opened.text(), "test message\n");
//! ```

pub mod crypto;
pub mod entropy;
pub mod error;
pub mod key;
pub mod note;
pub mod signer;
pub mod types;
pub mod verifier;

pub use crypto::{Algorithm, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use entropy::{EntropySource, OsEntropy};
pub use error::{DecodeError, Error, KeyRef, Result};
pub use key::{generate_key, generate_key_with, NoteKeyPair, VerifierKey, PRIVATE_KEY_PREFIX};
pub use note::{Note, NoteConfig, NoteSignature, SignedNote};
pub use signer::{sign, sign_text, sign_with, Signer};
pub use types::{is_valid_key_name, KeyId};
pub use verifier::{open, verify, verify_with, VerifiedNote, Verifier, VerifierList, Verifiers};
