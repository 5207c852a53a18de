//! Test fixtures and helpers.
//!
//! Deterministic entropy sources and ready-made signers for integration tests.

use note_signer_core::{
    sign_text, EntropySource, NoteKeyPair, OsEntropy, SignedNote, VerifierKey,
};

/// Entropy that repeats a fixed byte pattern.
///
/// Every fill starts from the beginning of the pattern, so each key
/// generated from it is identical.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
}

impl FixedEntropy {
    /// Entropy repeating `pattern`. An empty pattern yields zeros.
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Entropy yielding a seed verbatim.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(seed.to_vec())
    }

    /// All-zero entropy.
    pub fn zeros() -> Self {
        Self::new(Vec::new())
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if self.pattern.is_empty() {
            dest.fill(0);
            return Ok(());
        }
        for (byte, src) in dest.iter_mut().zip(self.pattern.iter().cycle()) {
            *byte = *src;
        }
        Ok(())
    }
}

/// Entropy that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source exhausted"))
    }
}

/// A named key pair with signing helpers.
pub struct TestSigner {
    pub pair: NoteKeyPair,
}

impl TestSigner {
    /// Create a signer with a random key.
    pub fn new(name: &str) -> Self {
        Self {
            pair: NoteKeyPair::generate_with(&OsEntropy, name).expect("valid test key name"),
        }
    }

    /// Create a signer with a deterministic key from seed.
    pub fn with_seed(name: &str, seed: [u8; 32]) -> Self {
        Self {
            pair: NoteKeyPair::from_seed(name, &seed).expect("valid test key name"),
        }
    }

    /// Encoded private key.
    pub fn private_key(&self) -> String {
        self.pair.encode_private()
    }

    /// Encoded public key.
    pub fn public_key(&self) -> String {
        self.pair.encode_public()
    }

    /// The public half.
    pub fn verifier_key(&self) -> VerifierKey {
        self.pair.verifier_key()
    }

    /// Sign `text` with this signer alone.
    pub fn sign(&self, text: &str) -> SignedNote {
        sign_text(text, &[&self.private_key()]).expect("valid test note")
    }
}

/// Create multiple deterministic signers named `signer-0`, `signer-1`, ...
pub fn multi_signer_fixtures(count: usize) -> Vec<TestSigner> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestSigner::with_seed(&format!("signer-{i}"), seed)
        })
        .collect()
}

/// Replace the character at `index` of `s` with a different base64 digit.
///
/// Panics if `index` is not on an ASCII character.
pub fn flip_char(s: &str, index: usize) -> String {
    let old = s.as_bytes()[index];
    assert!(old.is_ascii(), "index {index} is not an ASCII character");
    let new = if old == b'A' { 'B' } else { 'A' };
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..index]);
    out.push(new);
    out.push_str(&s[index + 1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use note_signer_core::{generate_key_with, Error};

    #[test]
    fn test_fixed_entropy_is_deterministic() {
        let source = FixedEntropy::from_seed([9; 32]);
        let first = generate_key_with(&source, "fixed").unwrap();
        let second = generate_key_with(&source, "fixed").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failing_entropy() {
        let err = generate_key_with(&FailingEntropy, "k").unwrap_err();
        assert!(matches!(err, Error::EntropyUnavailable(_)));
    }

    #[test]
    fn test_multi_signer_keys_differ() {
        let signers = multi_signer_fixtures(3);
        let keys: Vec<_> = signers.iter().map(|s| s.public_key()).collect();
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);
        assert!(keys[2].starts_with("signer-2+"));
    }

    #[test]
    fn test_flip_char() {
        assert_eq!(flip_char("xAz", 1), "xBz");
        assert_eq!(flip_char("xyz", 1), "xAz");
    }
}
