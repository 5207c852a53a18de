//! # Note Signer Testkit
//!
//! Testing utilities for note signing.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Published keys and signatures every implementation must reproduce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic entropy and ready-made signers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use note_signer_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     let pair = vector.key_pair();
//!     assert_eq!(pair.encode_public(), vector.public_key);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use note_signer_testkit::generators::{key_pair, note_text};
//!
//! proptest! {
//!     #[test]
//!     fn signed_notes_verify(pair in key_pair(), text in note_text()) {
//!         let signed = sign_text(&text, &[&pair.encode_private()]).unwrap();
//!         prop_assert!(verify(&signed.encode(), &[&pair.encode_public()]).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use note_signer_testkit::fixtures::{FixedEntropy, TestSigner};
//!
//! let signer = TestSigner::with_seed("alice", [7; 32]);
//! let signed = signer.sign("hello\n");
//! assert_eq!(signed.signatures().len(), 1);
//!
//! let zeros = FixedEntropy::zeros();
//! let (_, public) = note_signer_core::generate_key_with(&zeros, "EnochRoot").unwrap();
//! assert_eq!(public, "EnochRoot+af0cfe78+ATtqJ7zOtqQtYqOo0CpvDXNlMhV3HeJDpjrASKGLWdop");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{flip_char, multi_signer_fixtures, FailingEntropy, FixedEntropy, TestSigner};
pub use generators::{invalid_key_name, key_name, key_pair, note_text};
pub use vectors::{all_vectors, vector, verify_all_vectors, GoldenVector, QUOTE};
