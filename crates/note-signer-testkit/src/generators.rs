//! Proptest generators for property-based testing.

use proptest::prelude::*;

use note_signer_core::NoteKeyPair;

/// Generate a valid key name.
pub fn key_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9./_:-]{0,39}".prop_map(String::from)
}

/// Generate a string that is not a valid key name.
pub fn invalid_key_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        ("[a-z]{0,8}", "[a-z]{0,8}").prop_map(|(a, b)| format!("{a}+{b}")),
        ("[a-z]{0,8}", "[ \t\n]", "[a-z]{0,8}").prop_map(|(a, ws, b)| format!("{a}{ws}{b}")),
    ]
}

/// Generate a key pair with a random name and seed.
pub fn key_pair() -> impl Strategy<Value = NoteKeyPair> {
    (key_name(), any::<[u8; 32]>()).prop_map(|(name, seed)| {
        NoteKeyPair::from_seed(&name, &seed).expect("generated name is valid")
    })
}

/// Generate valid note text: printable lines, ending in exactly one newline.
pub fn note_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[^\\x00-\\x1f\\x7f]{0,60}", 1..8).prop_map(|lines| {
        let mut text = lines.join("\n");
        if text.is_empty() || text.ends_with('\n') {
            text.push('.');
        }
        text.push('\n');
        text
    })
}
