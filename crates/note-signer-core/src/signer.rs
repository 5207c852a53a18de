//! Signing notes.

use std::collections::HashSet;

use crate::error::{DecodeError, Error, Result};
use crate::key::NoteKeyPair;
use crate::note::{Note, NoteSignature, SignedNote};
use crate::types::KeyId;

/// Something that can sign note text under a named key.
pub trait Signer {
    /// Name of the signing key.
    fn name(&self) -> &str;

    /// Key ID of the signing key.
    fn key_id(&self) -> KeyId;

    /// Sign `message`, returning the raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

impl Signer for NoteKeyPair {
    fn name(&self) -> &str {
        NoteKeyPair::name(self)
    }

    fn key_id(&self) -> KeyId {
        NoteKeyPair::key_id(self)
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.keypair().sign(message).as_bytes().to_vec())
    }
}

/// Sign `text` with each encoded private key, in order.
///
/// Fails with [`Error::InvalidNoteText`] if the text is not a valid note and
/// with [`Error::MalformedKey`] if any key does not decode.
pub fn sign_text(text: &str, private_keys: &[&str]) -> Result<SignedNote> {
    let note = Note::new(text)?;
    sign(&note, private_keys)
}

/// Sign `note` with each encoded private key, in order.
pub fn sign(note: &Note, private_keys: &[&str]) -> Result<SignedNote> {
    let pairs = private_keys
        .iter()
        .map(|key| NoteKeyPair::decode_private(key).map_err(Error::MalformedKey))
        .collect::<Result<Vec<_>>>()?;
    let signers: Vec<&dyn Signer> = pairs.iter().map(|p| p as &dyn Signer).collect();
    sign_with(note, &signers)
}

/// Sign `note` with each signer, in order.
pub fn sign_with(note: &Note, signers: &[&dyn Signer]) -> Result<SignedNote> {
    let mut signed = SignedNote::unsigned(note.clone());
    signed.add_signatures(signers)?;
    Ok(signed)
}

impl SignedNote {
    /// Add a signature from each signer.
    ///
    /// New signatures follow the existing ones in signer order. An existing
    /// signature from the same name and key ID as a new signer is dropped.
    pub fn add_signatures(&mut self, signers: &[&dyn Signer]) -> Result<()> {
        if signers.is_empty() {
            return Err(Error::MalformedKey(DecodeError::MissingField("private key")));
        }

        let mut new_sigs = Vec::with_capacity(signers.len());
        let mut replaced = HashSet::new();
        for signer in signers {
            let sig = signer.sign(self.text().as_bytes())?;
            new_sigs.push(NoteSignature::new(signer.name(), signer.key_id(), sig)?);
            replaced.insert((signer.name().to_string(), signer.key_id()));
        }

        let sigs = self.signatures_mut();
        sigs.retain(|s| !replaced.contains(&(s.name().to_string(), s.key_id())));
        sigs.extend(new_sigs);
        Ok(())
    }
}
