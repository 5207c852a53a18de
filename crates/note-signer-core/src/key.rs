//! Named note keys and their text encodings.
//!
//! A note key pair is an Ed25519 keypair bound to a name. It travels as two
//! strings:
//!
//! ```text
//! PRIVATE+KEY+<name>+<keyid>+<base64(0x01 || seed)>
//! <name>+<keyid>+<base64(0x01 || public key)>
//! ```
//!
//! `<keyid>` is the 8-digit lowercase hex [`KeyId`]. Decoding is strict, so
//! every accepted string re-encodes to exactly itself.

use base64::prelude::*;
use std::fmt;
use std::str::FromStr;

use crate::crypto::{Algorithm, Ed25519PublicKey, Keypair, PUBLIC_KEY_LENGTH, SEED_LENGTH};
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{DecodeError, Error, Result};
use crate::types::{is_valid_key_name, KeyId};

/// Literal prefix of every encoded private key.
pub const PRIVATE_KEY_PREFIX: &str = "PRIVATE+KEY+";

/// Generate a fresh key pair named `name` from the OS CSPRNG and return
/// `(private_key, public_key)` in encoded form.
pub fn generate_key(name: &str) -> Result<(String, String)> {
    generate_key_with(&OsEntropy, name)
}

/// Like [`generate_key`], drawing the seed from `source`.
pub fn generate_key_with(source: &dyn EntropySource, name: &str) -> Result<(String, String)> {
    let pair = NoteKeyPair::generate_with(source, name)?;
    Ok((pair.encode_private(), pair.encode_public()))
}

/// An Ed25519 keypair bound to a key name.
#[derive(Clone)]
pub struct NoteKeyPair {
    name: String,
    id: KeyId,
    keypair: Keypair,
}

impl NoteKeyPair {
    /// Generate a new key pair from the OS CSPRNG.
    pub fn generate(name: &str) -> Result<Self> {
        Self::generate_with(&OsEntropy, name)
    }

    /// Generate a new key pair from `source`.
    ///
    /// The name is checked before any entropy is consumed.
    pub fn generate_with(source: &dyn EntropySource, name: &str) -> Result<Self> {
        if !is_valid_key_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        let keypair = Keypair::generate(source)?;
        Ok(Self::from_keypair(name.to_string(), keypair))
    }

    /// Create from a name and a 32-byte seed.
    pub fn from_seed(name: &str, seed: &[u8; 32]) -> Result<Self> {
        if !is_valid_key_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(Self::from_keypair(name.to_string(), Keypair::from_seed(seed)))
    }

    fn from_keypair(name: String, keypair: Keypair) -> Self {
        let id = KeyId::compute(&name, &keypair.public_key());
        Self { name, id, keypair }
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key ID.
    pub fn key_id(&self) -> KeyId {
        self.id
    }

    /// The signature algorithm.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::Ed25519
    }

    /// The public key material.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// The underlying keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// The public half of this pair.
    pub fn verifier_key(&self) -> VerifierKey {
        VerifierKey {
            name: self.name.clone(),
            id: self.id,
            public_key: self.public_key(),
        }
    }

    /// Encode as `PRIVATE+KEY+<name>+<keyid>+<base64>`.
    pub fn encode_private(&self) -> String {
        let mut material = Vec::with_capacity(1 + SEED_LENGTH);
        material.push(Algorithm::Ed25519.id());
        material.extend_from_slice(&self.keypair.seed());
        format!(
            "{PRIVATE_KEY_PREFIX}{}+{}+{}",
            self.name,
            self.id,
            BASE64_STANDARD.encode(material)
        )
    }

    /// Encode as `<name>+<keyid>+<base64>`.
    pub fn encode_public(&self) -> String {
        self.verifier_key().encode()
    }

    /// Decode an encoded private key.
    ///
    /// The key ID is recomputed from the derived public key and must match
    /// the encoded one.
    pub fn decode_private(encoded: &str) -> std::result::Result<Self, DecodeError> {
        let rest = encoded
            .strip_prefix(PRIVATE_KEY_PREFIX)
            .ok_or(DecodeError::MissingPrefix)?;
        let fields = KeyFields::split(rest)?;

        let seed: [u8; SEED_LENGTH] = fields.material_array()?;
        let pair = Self::from_keypair(fields.name.to_string(), Keypair::from_seed(&seed));
        if pair.id != fields.id {
            return Err(DecodeError::KeyIdMismatch {
                encoded: fields.id,
                computed: pair.id,
            });
        }
        Ok(pair)
    }
}

impl fmt::Debug for NoteKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteKeyPair")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl PartialEq for NoteKeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.keypair.seed() == other.keypair.seed()
    }
}

impl Eq for NoteKeyPair {}

/// The public half of a [`NoteKeyPair`]: name, key ID and public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerifierKey {
    name: String,
    id: KeyId,
    public_key: Ed25519PublicKey,
}

impl VerifierKey {
    /// Build a verifier key from a name and Ed25519 public key.
    pub fn new(name: &str, public_key: Ed25519PublicKey) -> Result<Self> {
        if !is_valid_key_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        public_key.validate()?;
        Ok(Self {
            name: name.to_string(),
            id: KeyId::compute(name, &public_key),
            public_key,
        })
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key ID.
    pub fn key_id(&self) -> KeyId {
        self.id
    }

    /// The public key material.
    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    /// Report whether `signature` is a valid signature of `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.public_key.verify(message, signature)
    }

    /// Encode as `<name>+<keyid>+<base64>`.
    pub fn encode(&self) -> String {
        let mut material = Vec::with_capacity(1 + PUBLIC_KEY_LENGTH);
        material.push(Algorithm::Ed25519.id());
        material.extend_from_slice(self.public_key.as_bytes());
        format!(
            "{}+{}+{}",
            self.name,
            self.id,
            BASE64_STANDARD.encode(material)
        )
    }

    /// Decode an encoded public key.
    pub fn decode(encoded: &str) -> std::result::Result<Self, DecodeError> {
        let fields = KeyFields::split(encoded)?;
        let public_key = Ed25519PublicKey::from_bytes(fields.material_array()?);
        public_key.validate()?;

        let computed = KeyId::compute(fields.name, &public_key);
        if computed != fields.id {
            return Err(DecodeError::KeyIdMismatch {
                encoded: fields.id,
                computed,
            });
        }
        Ok(Self {
            name: fields.name.to_string(),
            id: fields.id,
            public_key,
        })
    }
}

impl fmt::Display for VerifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for VerifierKey {
    type Err = DecodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// The `<name>+<keyid>+<base64>` tail shared by both encodings.
struct KeyFields<'a> {
    name: &'a str,
    id: KeyId,
    material: Vec<u8>,
}

impl<'a> KeyFields<'a> {
    fn split(s: &'a str) -> std::result::Result<Self, DecodeError> {
        let (name, rest) = s.split_once('+').ok_or(DecodeError::MissingField("key id"))?;
        let (id_hex, data) = rest
            .split_once('+')
            .ok_or(DecodeError::MissingField("key data"))?;

        if !is_valid_key_name(name) {
            return Err(DecodeError::InvalidName(name.to_string()));
        }
        let id = KeyId::from_hex(id_hex)?;
        if data.is_empty() {
            return Err(DecodeError::MissingField("key data"));
        }
        let material = BASE64_STANDARD
            .decode(data)
            .map_err(|_| DecodeError::InvalidBase64)?;

        Ok(Self { name, id, material })
    }

    /// Strip the algorithm byte and return the fixed-length key material.
    fn material_array<const N: usize>(&self) -> std::result::Result<[u8; N], DecodeError> {
        let (&alg, key) = self
            .material
            .split_first()
            .ok_or(DecodeError::MissingField("key data"))?;
        Algorithm::from_id(alg)?;
        key.try_into().map_err(|_| DecodeError::InvalidLength {
            expected: N,
            got: key.len(),
        })
    }
}
