//! Verifying signed notes.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, KeyRef, Result};
use crate::key::VerifierKey;
use crate::note::{Note, NoteConfig, NoteSignature, SignedNote};
use crate::types::KeyId;

/// Something that can check signatures made by one named key.
pub trait Verifier {
    /// Name of the key.
    fn name(&self) -> &str;

    /// Key ID of the key.
    fn key_id(&self) -> KeyId;

    /// Report whether `signature` is a valid signature of `message`.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;
}

impl Verifier for VerifierKey {
    fn name(&self) -> &str {
        VerifierKey::name(self)
    }

    fn key_id(&self) -> KeyId {
        VerifierKey::key_id(self)
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        VerifierKey::verify(self, message, signature)
    }
}

/// A set of known verifiers, indexed by key ID.
pub trait Verifiers {
    /// All known verifiers with key ID `id`. Empty if the ID is unknown.
    fn lookup(&self, id: KeyId) -> Vec<&dyn Verifier>;
}

/// The standard [`Verifiers`]: a list of verifier keys.
#[derive(Debug, Clone, Default)]
pub struct VerifierList {
    by_id: HashMap<KeyId, Vec<VerifierKey>>,
}

impl VerifierList {
    /// Build from a list of keys. Repeated keys are kept once.
    pub fn new(keys: impl IntoIterator<Item = VerifierKey>) -> Self {
        let mut by_id: HashMap<KeyId, Vec<VerifierKey>> = HashMap::new();
        for key in keys {
            let entry = by_id.entry(key.key_id()).or_default();
            if !entry.contains(&key) {
                entry.push(key);
            }
        }
        Self { by_id }
    }

    /// Decode and collect encoded public keys.
    pub fn decode(encoded: &[&str]) -> Result<Self> {
        let keys = encoded
            .iter()
            .map(|s| VerifierKey::decode(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.by_id.values().map(Vec::len).sum()
    }

    /// Whether the list holds no keys.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// The key IDs in this list.
    pub fn key_ids(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.by_id.keys().copied()
    }
}

impl Verifiers for VerifierList {
    fn lookup(&self, id: KeyId) -> Vec<&dyn Verifier> {
        self.by_id
            .get(&id)
            .map(|keys| keys.iter().map(|k| k as &dyn Verifier).collect())
            .unwrap_or_default()
    }
}

/// A note whose signatures have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedNote {
    note: Note,
    verified: Vec<NoteSignature>,
    unverified: Vec<NoteSignature>,
}

impl VerifiedNote {
    /// The verified note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    /// The note text.
    pub fn text(&self) -> &str {
        self.note.text()
    }

    /// Signatures that verified, one per key, in note order.
    pub fn verified(&self) -> &[NoteSignature] {
        &self.verified
    }

    /// Signatures from keys not in the verifier set.
    pub fn unverified(&self) -> &[NoteSignature] {
        &self.unverified
    }

    /// Consume, returning the note.
    pub fn into_note(self) -> Note {
        self.note
    }
}

/// Parse `msg` and verify it against encoded public keys.
pub fn verify(msg: &str, public_keys: &[&str]) -> Result<VerifiedNote> {
    let known = VerifierList::decode(public_keys)?;
    verify_with(msg, &known, &NoteConfig::default())
}

/// Parse `msg` under `config` and verify it against `known`.
pub fn verify_with(msg: &str, known: &impl Verifiers, config: &NoteConfig) -> Result<VerifiedNote> {
    let signed = SignedNote::parse_with(msg, config)?;
    open(&signed, known)
}

/// Check the signatures on a parsed note.
///
/// Signatures whose key ID is unknown are skipped without any cryptographic
/// work. A known key ID whose keys all carry a different name is a
/// [`Error::NameMismatch`]. The note is accepted if at least one signature
/// verifies; otherwise [`Error::NoValidSignature`] reports which keys were
/// unknown and which failed.
pub fn open(signed: &SignedNote, known: &impl Verifiers) -> Result<VerifiedNote> {
    let message = signed.text().as_bytes();

    let mut verified = Vec::new();
    let mut unverified: Vec<NoteSignature> = Vec::new();
    let mut failed: Vec<KeyRef> = Vec::new();
    let mut seen = HashSet::new();

    for sig in signed.signatures() {
        let candidates = known.lookup(sig.key_id());
        if candidates.is_empty() {
            if !unverified.contains(sig) {
                unverified.push(sig.clone());
            }
            continue;
        }

        let named: Vec<_> = candidates
            .iter()
            .filter(|v| v.name() == sig.name())
            .collect();
        if named.is_empty() {
            return Err(Error::NameMismatch {
                signature_name: sig.name().to_string(),
                key_name: candidates[0].name().to_string(),
                id: sig.key_id(),
            });
        }

        let key = (sig.name(), sig.key_id());
        if seen.contains(&key) {
            continue;
        }
        if named.iter().any(|v| v.verify(message, sig.signature())) {
            seen.insert(key);
            verified.push(sig.clone());
        } else {
            let key_ref = key_ref(sig);
            if !failed.contains(&key_ref) {
                failed.push(key_ref);
            }
        }
    }

    if verified.is_empty() {
        return Err(Error::NoValidSignature {
            unknown: unverified.iter().map(key_ref).collect(),
            failed,
        });
    }

    Ok(VerifiedNote {
        note: signed.note().clone(),
        verified,
        unverified,
    })
}

fn key_ref(sig: &NoteSignature) -> KeyRef {
    KeyRef {
        name: sig.name().to_string(),
        id: sig.key_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::NoteKeyPair;
    use crate::signer::sign_text;

    const PETER_PUBLIC: &str = "PeterNeumann+c74f20a3+ARpc2QcUPDhMQegwxbzhKqiBfsVkmqq/LDE4izWy10TW";
    const ENOCH_PUBLIC: &str = "EnochRoot+af0cfe78+ATtqJ7zOtqQtYqOo0CpvDXNlMhV3HeJDpjrASKGLWdop";
    const TEXT: &str = "If you think cryptography is the answer to your problem,\n\
                        then you don't know what your problem is.\n";
    const PETER_SIG: &str = "— PeterNeumann x08go/ZJkuBS9UG/SffcvIAQxVBtiFupLLr8pAcElZInNIuGUgYN1FFYC2pZSNXgKvqfqdngotpRZb6KE6RyyBwJnAM=\n";
    const ENOCH_SIG: &str = "— EnochRoot rwz+eBzmZa0SO3NbfRGzPCpDckykFXSdeX+MNtCOXm2/5n2tiOHp+vAF1aGrQ5ovTG01oOTGwnWLox33WWd1RvMc+QQ=\n";

    #[test]
    fn test_verify_known_note() {
        let msg = format!("{TEXT}\n{PETER_SIG}");
        let opened = verify(&msg, &[PETER_PUBLIC]).unwrap();
        assert_eq!(opened.text(), TEXT);
        assert_eq!(opened.verified().len(), 1);
        assert_eq!(opened.verified()[0].name(), "PeterNeumann");
        assert!(opened.unverified().is_empty());
    }

    #[test]
    fn test_one_verified_one_unknown() {
        let msg = format!("{TEXT}\n{PETER_SIG}{ENOCH_SIG}");
        let opened = verify(&msg, &[PETER_PUBLIC]).unwrap();
        assert_eq!(opened.verified().len(), 1);
        assert_eq!(opened.unverified().len(), 1);
        assert_eq!(opened.unverified()[0].name(), "EnochRoot");

        let opened = verify(&msg, &[PETER_PUBLIC, ENOCH_PUBLIC]).unwrap();
        assert_eq!(opened.verified().len(), 2);
        assert!(opened.unverified().is_empty());
    }

    #[test]
    fn test_no_known_keys() {
        let msg = format!("{TEXT}\n{PETER_SIG}");
        let err = verify(&msg, &[ENOCH_PUBLIC]).unwrap_err();
        match err {
            Error::NoValidSignature { unknown, failed } => {
                assert_eq!(unknown.len(), 1);
                assert_eq!(unknown[0].to_string(), "PeterNeumann+c74f20a3");
                assert!(failed.is_empty());
            }
            other => panic!("expected NoValidSignature, got {other:?}"),
        }
    }

    #[test]
    fn test_tampered_text_fails() {
        let msg = format!("{TEXT}\n{PETER_SIG}").replace("cryptography", "cryptographz");
        let err = verify(&msg, &[PETER_PUBLIC]).unwrap_err();
        match err {
            Error::NoValidSignature { unknown, failed } => {
                assert!(unknown.is_empty());
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].name, "PeterNeumann");
            }
            other => panic!("expected NoValidSignature, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_signatures_count_once() {
        let msg = format!("{TEXT}\n{PETER_SIG}{PETER_SIG}{PETER_SIG}");
        let opened = verify(&msg, &[PETER_PUBLIC, PETER_PUBLIC]).unwrap();
        assert_eq!(opened.verified().len(), 1);
    }

    #[test]
    fn test_renamed_signature_is_name_mismatch() {
        let sig = PETER_SIG.replace("PeterNeumann", "CarmenSandiego");
        let msg = format!("{TEXT}\n{sig}");
        let err = verify(&msg, &[PETER_PUBLIC]).unwrap_err();
        match err {
            Error::NameMismatch {
                signature_name,
                key_name,
                id,
            } => {
                assert_eq!(signature_name, "CarmenSandiego");
                assert_eq!(key_name, "PeterNeumann");
                assert_eq!(id, KeyId::from_u32(0xc74f_20a3));
            }
            other => panic!("expected NameMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_rejects_bad_public_key() {
        let msg = format!("{TEXT}\n{PETER_SIG}");
        let err = verify(&msg, &["PeterNeumann+c74f20a3"]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_sign_then_verify_generated_pair() {
        let pair = NoteKeyPair::generate("test-key").unwrap();
        let signed = sign_text("test message\n", &[&pair.encode_private()]).unwrap();
        let opened = verify(&signed.encode(), &[&pair.encode_public()]).unwrap();
        assert_eq!(opened.into_note(), Note::new("test message\n").unwrap());
    }

    #[test]
    fn test_verifier_list_dedupes() {
        let list = VerifierList::decode(&[PETER_PUBLIC, PETER_PUBLIC, ENOCH_PUBLIC]).unwrap();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert!(list.lookup(KeyId::from_u32(0xc74f_20a3)).len() == 1);
        assert!(list.lookup(KeyId::from_u32(0)).is_empty());
    }
}
