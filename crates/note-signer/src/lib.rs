//! # Note Signer
//!
//! A provider exposing one ephemeral resource, `keypair`, which generates a
//! fresh key pair for signing notes every time it is opened.
//!
//! ## Overview
//!
//! - **Provider**: names itself `note-signer`, has no configuration, and
//!   hands out its ephemeral resources
//! - **Ephemeral resource**: `describe` / `open` / `close`, decoupled from
//!   any plugin transport
//! - **Schema**: `name` (required), `private_key` (computed, sensitive),
//!   `public_key` (computed)
//! - **Diagnostics**: errors rendered as summary/detail pairs for the host
//!
//! ## Usage
//!
//! ```rust
//! use note_signer::{EphemeralResource, NoteSignerProvider};
//! use serde_json::json;
//!
//! let provider = NoteSignerProvider::new("dev");
//! let keypair = provider.ephemeral_resource("note-signer_keypair").unwrap();
//!
//! let response = keypair.open(json!({ "name": "test-key" })).unwrap();
//! let private_key = response.result["private_key"].as_str().unwrap();
//! let public_key = response.result["public_key"].as_str().unwrap();
//!
//! let signed = note_signer::core::sign_text("test message\n", &[private_key]).unwrap();
//! let opened = note_signer::core::verify(&signed.encode(), &[public_key]).unwrap();
//! assert_eq!(opened.text(), "test message\n");
//!
//! keypair.close();
//! ```
//!
//! ## Re-exports
//!
//! - `note_signer::core` - the note signing scheme (keys, notes, sign, verify)

pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod resource;
pub mod schema;

pub use note_signer_core as core;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ProviderError, Result};
pub use provider::{NoteSignerProvider, ProviderMetadata, ProviderModel, PROVIDER_TYPE_NAME};
pub use resource::{EphemeralResource, KeyPairModel, KeyPairResource, OpenResponse};
pub use schema::{Attribute, AttributeType, Schema};

pub use note_signer_core::{
    generate_key, sign_text, verify, Error as NoteError, KeyId, Note, NoteKeyPair, SignedNote,
    VerifierKey,
};
