//! Notes and the signed-note text format.
//!
//! A signed note is the note text, a blank line, and one signature line per
//! signer:
//!
//! ```text
//! <text ending in exactly one newline>
//!
//! — <name> <base64(keyid || signature)>
//! ```
//!
//! The whole message must be UTF-8 with no ASCII control characters other
//! than newline. A signature covers the text bytes exactly, including the
//! final newline and excluding the blank separator line.

use base64::prelude::*;
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{is_valid_key_name, KeyId};

/// Marker that starts every signature line (em dash, space).
pub const SIGNATURE_PREFIX: &str = "\u{2014} ";

/// Limits applied when parsing signed notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteConfig {
    /// Largest signed note, in bytes, that will be parsed.
    pub max_note_size: usize,
    /// Most signature lines a signed note may carry.
    pub max_signatures: usize,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            max_note_size: 1_000_000,
            max_signatures: 100,
        }
    }
}

/// The text of a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    text: String,
}

impl Note {
    /// Create a note, checking that `text` is well-formed.
    ///
    /// The text must end in exactly one newline and contain no ASCII control
    /// characters other than newline.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !text.ends_with('\n') {
            return Err(Error::InvalidNoteText("text must end in a newline".into()));
        }
        if text.ends_with("\n\n") {
            return Err(Error::InvalidNoteText(
                "text must end in exactly one newline".into(),
            ));
        }
        if let Some(ch) = first_control_char(&text) {
            return Err(Error::InvalidNoteText(format!(
                "text contains control character {:?}",
                ch
            )));
        }
        Ok(Self { text })
    }

    /// The note text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the note, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

fn first_control_char(s: &str) -> Option<char> {
    s.chars().find(|&ch| ch < '\u{20}' && ch != '\n')
}

/// A single signature line on a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteSignature {
    name: String,
    id: KeyId,
    signature: Vec<u8>,
}

impl NoteSignature {
    /// Create a signature by the key `name`/`id`.
    pub fn new(name: impl Into<String>, id: KeyId, signature: Vec<u8>) -> Result<Self> {
        let name = name.into();
        if !is_valid_key_name(&name) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            id,
            signature,
        })
    }

    /// Name of the key that made the signature.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key ID of the key that made the signature.
    pub fn key_id(&self) -> KeyId {
        self.id
    }

    /// Raw signature bytes, without the key ID prefix.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Parse one signature line, without its trailing newline.
    pub fn parse_line(line: &str) -> Result<Self> {
        let body = line
            .strip_prefix(SIGNATURE_PREFIX)
            .ok_or_else(|| malformed("signature line must start with an em dash"))?;
        let (name, b64) = body
            .split_once(' ')
            .ok_or_else(|| malformed("signature line is missing its signature"))?;
        if !is_valid_key_name(name) {
            return Err(malformed(format!("invalid signer name {:?}", name)));
        }
        let bytes = BASE64_STANDARD
            .decode(b64)
            .map_err(|_| malformed(format!("invalid base64 in signature by {}", name)))?;
        if bytes.len() < 5 {
            return Err(malformed(format!("signature by {} is too short", name)));
        }
        let (id, signature) = bytes.split_at(4);
        let id = KeyId::from_u32(u32::from_be_bytes([id[0], id[1], id[2], id[3]]));
        Ok(Self {
            name: name.to_string(),
            id,
            signature: signature.to_vec(),
        })
    }

    /// Encode as a signature line, including the trailing newline.
    pub fn to_line(&self) -> String {
        let mut bytes = Vec::with_capacity(4 + self.signature.len());
        bytes.extend_from_slice(&self.id.to_be_bytes());
        bytes.extend_from_slice(&self.signature);
        format!(
            "{SIGNATURE_PREFIX}{} {}\n",
            self.name,
            BASE64_STANDARD.encode(bytes)
        )
    }
}

/// A note together with its signature lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedNote {
    note: Note,
    signatures: Vec<NoteSignature>,
}

impl SignedNote {
    /// Combine a note with signatures.
    ///
    /// At least one signature is required, so that the encoded form parses
    /// back.
    pub fn new(note: Note, signatures: Vec<NoteSignature>) -> Result<Self> {
        if signatures.is_empty() {
            return Err(malformed("a signed note needs at least one signature"));
        }
        Ok(Self { note, signatures })
    }

    /// A note with no signatures yet, to be filled by `add_signatures`.
    pub(crate) fn unsigned(note: Note) -> Self {
        Self {
            note,
            signatures: Vec::new(),
        }
    }

    /// Parse a signed note using the default [`NoteConfig`].
    pub fn parse(msg: &str) -> Result<Self> {
        Self::parse_with(msg, &NoteConfig::default())
    }

    /// Parse a signed note.
    ///
    /// The text is everything up to the last blank line. Every line after it
    /// must be a well-formed signature line, and there must be at least one.
    pub fn parse_with(msg: &str, config: &NoteConfig) -> Result<Self> {
        if msg.len() > config.max_note_size {
            return Err(malformed(format!(
                "note is {} bytes, limit is {}",
                msg.len(),
                config.max_note_size
            )));
        }
        if let Some(ch) = first_control_char(msg) {
            return Err(malformed(format!("message contains control character {:?}", ch)));
        }

        let split = msg
            .rfind("\n\n")
            .ok_or_else(|| malformed("missing blank line before signatures"))?;
        let (text, block) = (&msg[..=split], &msg[split + 2..]);
        let block = block
            .strip_suffix('\n')
            .ok_or_else(|| malformed("signature block must end in a newline"))?;

        let mut signatures = Vec::new();
        for line in block.split('\n') {
            if signatures.len() == config.max_signatures {
                return Err(malformed(format!(
                    "more than {} signatures",
                    config.max_signatures
                )));
            }
            signatures.push(NoteSignature::parse_line(line)?);
        }

        let note = Note::new(text).map_err(|e| malformed(e.to_string()))?;
        Ok(Self { note, signatures })
    }

    /// The signed note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    /// The note text.
    pub fn text(&self) -> &str {
        self.note.text()
    }

    /// The signatures, in encoded order.
    pub fn signatures(&self) -> &[NoteSignature] {
        &self.signatures
    }

    /// Encode in signed-note format.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.note.text.len() + 1 + 100 * self.signatures.len());
        out.push_str(&self.note.text);
        out.push('\n');
        for sig in &self.signatures {
            out.push_str(&sig.to_line());
        }
        out
    }

    pub(crate) fn signatures_mut(&mut self) -> &mut Vec<NoteSignature> {
        &mut self.signatures
    }
}

impl fmt::Display for SignedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn malformed(msg: impl Into<String>) -> Error {
    Error::MalformedSignedNote(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "If you think cryptography is the answer to your problem,\n\
                        then you don't know what your problem is.\n";
    const PETER_SIG: &str = "— PeterNeumann x08go/ZJkuBS9UG/SffcvIAQxVBtiFupLLr8pAcElZInNIuGUgYN1FFYC2pZSNXgKvqfqdngotpRZb6KE6RyyBwJnAM=\n";

    #[test]
    fn test_note_text_rules() {
        assert!(Note::new("test message\n").is_ok());
        assert!(Note::new("two\nlines\n").is_ok());
        assert!(Note::new("para\n\nbreak\n").is_ok());

        for bad in ["", "no newline", "double\n\n", "\n\n", "tab\there\n", "bell\x07\n"] {
            assert!(
                matches!(Note::new(bad), Err(Error::InvalidNoteText(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_signature_line() {
        let sig = NoteSignature::parse_line(PETER_SIG.trim_end()).unwrap();
        assert_eq!(sig.name(), "PeterNeumann");
        assert_eq!(sig.key_id(), KeyId::from_u32(0xc74f_20a3));
        assert_eq!(sig.signature().len(), 64);
        assert_eq!(sig.to_line(), PETER_SIG);
    }

    #[test]
    fn test_parse_signed_note() {
        let msg = format!("{TEXT}\n{PETER_SIG}");
        let signed = SignedNote::parse(&msg).unwrap();
        assert_eq!(signed.text(), TEXT);
        assert_eq!(signed.signatures().len(), 1);
        assert_eq!(signed.encode(), msg);
    }

    #[test]
    fn test_parse_keeps_blank_lines_inside_text() {
        let text = "first\n\nsecond\n";
        let msg = format!("{text}\n{PETER_SIG}");
        let signed = SignedNote::parse(&msg).unwrap();
        assert_eq!(signed.text(), text);
    }

    #[test]
    fn test_parse_rejects_malformed_messages() {
        let bad = [
            TEXT.to_string(),
            format!("\n{TEXT}"),
            format!("{TEXT}\n"),
            format!("{TEXT}\n{}", PETER_SIG.trim_end()),
            format!("\x01{TEXT}\n{PETER_SIG}"),
            format!("{TEXT}\n— Bad Name x08go/ZJkuBS9UG/SffcvIAQxVBtiFupLLr8pAcElZInNIuGUgYN1FFYC2pZSNXgKvqfqdngotpRZb6KE6RyyBwJnAM=\n"),
            format!("{TEXT}\n- PeterNeumann x08go/ZJkuBS9UG/SffcvIAQxVBtiFupLLr8pAcElZInNIuGUgYN1FFYC2pZSNXgKvqfqdngotpRZb6KE6RyyBwJnAM=\n"),
            format!("{TEXT}\n— PeterNeumann x08g\n"),
            format!("{TEXT}\n— PeterNeumann not*base64\n"),
            format!("{TEXT}\n{PETER_SIG}\n"),
        ];
        for msg in bad {
            assert!(
                matches!(SignedNote::parse(&msg), Err(Error::MalformedSignedNote(_))),
                "{msg:?}"
            );
        }
    }

    #[test]
    fn test_parse_enforces_limits() {
        let msg = format!("{TEXT}\n{}", PETER_SIG.repeat(101));
        assert!(matches!(
            SignedNote::parse(&msg),
            Err(Error::MalformedSignedNote(_))
        ));

        let msg = format!("{TEXT}\n{}", PETER_SIG.repeat(3));
        let config = NoteConfig {
            max_signatures: 2,
            ..NoteConfig::default()
        };
        assert!(SignedNote::parse_with(&msg, &config).is_err());

        let config = NoteConfig {
            max_note_size: 16,
            ..NoteConfig::default()
        };
        assert!(SignedNote::parse_with(&msg, &config).is_err());
    }

    #[test]
    fn test_signature_rejects_bad_name() {
        assert!(matches!(
            NoteSignature::new("a+b", KeyId::from_u32(0), vec![]),
            Err(Error::InvalidName(_))
        ));
    }

    #[test]
    fn test_signed_note_requires_signature() {
        let note = Note::new(TEXT).unwrap();
        assert!(matches!(
            SignedNote::new(note.clone(), Vec::new()),
            Err(Error::MalformedSignedNote(_))
        ));

        let sig = NoteSignature::parse_line(PETER_SIG.trim_end_matches('\n')).unwrap();
        let signed = SignedNote::new(note, vec![sig]).unwrap();
        assert_eq!(SignedNote::parse(&signed.encode()).unwrap(), signed);
    }
}
