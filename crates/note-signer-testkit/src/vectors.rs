//! Golden test vectors for the signed-note format.
//!
//! These keys and signatures are the published signed-note examples, so any
//! conforming implementation must reproduce them byte for byte.

use note_signer_core::{KeyId, NoteKeyPair};

/// Text signed by every vector.
pub const QUOTE: &str = "If you think cryptography is the answer to your problem,\n\
                         then you don't know what your problem is.\n";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Key name.
    pub name: &'static str,
    /// Ed25519 seed (hex).
    pub seed_hex: &'static str,
    /// Expected encoded private key.
    pub private_key: &'static str,
    /// Expected encoded public key.
    pub public_key: &'static str,
    /// Expected key ID.
    pub key_id: u32,
    /// Expected signature line over [`QUOTE`], with trailing newline.
    pub quote_signature: &'static str,
}

impl GoldenVector {
    /// Decode [`Self::seed_hex`].
    pub fn seed(&self) -> [u8; 32] {
        let bytes = hex::decode(self.seed_hex).expect("golden seed is valid hex");
        bytes.try_into().expect("golden seed is 32 bytes")
    }

    /// Key pair rebuilt from the seed.
    pub fn key_pair(&self) -> NoteKeyPair {
        NoteKeyPair::from_seed(self.name, &self.seed()).expect("golden name is valid")
    }

    /// Expected key ID.
    pub fn key_id(&self) -> KeyId {
        KeyId::from_u32(self.key_id)
    }

    /// [`QUOTE`] signed by this vector's key alone.
    pub fn signed_quote(&self) -> String {
        format!("{QUOTE}\n{}", self.quote_signature)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "PeterNeumann",
            seed_hex: "810a1402d5146c8d84f2443330f54080ebf98ee17d9c74f6252fc5d5c7283173",
            private_key: "PRIVATE+KEY+PeterNeumann+c74f20a3+AYEKFALVFGyNhPJEMzD1QIDr+Y7hfZx09iUvxdXHKDFz",
            public_key: "PeterNeumann+c74f20a3+ARpc2QcUPDhMQegwxbzhKqiBfsVkmqq/LDE4izWy10TW",
            key_id: 0xc74f_20a3,
            quote_signature: "— PeterNeumann x08go/ZJkuBS9UG/SffcvIAQxVBtiFupLLr8pAcElZInNIuGUgYN1FFYC2pZSNXgKvqfqdngotpRZb6KE6RyyBwJnAM=\n",
        },
        GoldenVector {
            name: "EnochRoot",
            seed_hex: "0000000000000000000000000000000000000000000000000000000000000000",
            private_key: "PRIVATE+KEY+EnochRoot+af0cfe78+AQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
            public_key: "EnochRoot+af0cfe78+ATtqJ7zOtqQtYqOo0CpvDXNlMhV3HeJDpjrASKGLWdop",
            key_id: 0xaf0c_fe78,
            quote_signature: "— EnochRoot rwz+eBzmZa0SO3NbfRGzPCpDckykFXSdeX+MNtCOXm2/5n2tiOHp+vAF1aGrQ5ovTG01oOTGwnWLox33WWd1RvMc+QQ=\n",
        },
    ]
}

/// Look up a vector by key name.
pub fn vector(name: &str) -> Option<GoldenVector> {
    all_vectors().into_iter().find(|v| v.name == name)
}

/// Check every vector, returning `(name, matches)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| {
            let pair = v.key_pair();
            let signed = note_signer_core::sign_text(QUOTE, &[v.private_key]);
            let matches = pair.encode_private() == v.private_key
                && pair.encode_public() == v.public_key
                && pair.key_id() == v.key_id()
                && signed.map(|s| s.encode() == v.signed_quote()).unwrap_or(false);
            (v.name.to_string(), matches)
        })
        .collect()
}
