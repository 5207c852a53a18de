//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the signed-note format must produce identical:
//! - encoded private key
//! - encoded public key
//! - key id
//! - signature line (deterministic Ed25519)

use note_signer::core::{
    sign_text, verify, Error, KeyId, NoteKeyPair, SignedNote, VerifierKey,
};
use note_signer_testkit::vectors::{all_vectors, vector, QUOTE};
use serde_json::json;

#[test]
fn test_vectors_reproduce_keys() {
    for v in all_vectors() {
        let pair = v.key_pair();
        assert_eq!(pair.encode_private(), v.private_key, "private key mismatch for {}", v.name);
        assert_eq!(pair.encode_public(), v.public_key, "public key mismatch for {}", v.name);
        assert_eq!(pair.key_id(), v.key_id(), "key id mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_reproduce_signatures() {
    for v in all_vectors() {
        let signed = sign_text(QUOTE, &[v.private_key]).unwrap();
        assert_eq!(signed.encode(), v.signed_quote(), "signature mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_verify() {
    for v in all_vectors() {
        let opened = verify(&v.signed_quote(), &[v.public_key]).unwrap();
        assert_eq!(opened.text(), QUOTE);
        assert_eq!(opened.verified().len(), 1);
        assert_eq!(opened.verified()[0].name(), v.name);
        assert_eq!(opened.verified()[0].key_id(), v.key_id());
    }
}

#[test]
fn test_vectors_decode_and_reencode() {
    for v in all_vectors() {
        let pair = NoteKeyPair::decode_private(v.private_key).unwrap();
        assert_eq!(pair, v.key_pair());
        assert_eq!(pair.encode_private(), v.private_key);

        let key: VerifierKey = v.public_key.parse().unwrap();
        assert_eq!(key.name(), v.name);
        assert_eq!(key.encode(), v.public_key);
        assert_eq!(key, pair.verifier_key());
    }
}

#[test]
fn test_signatures_follow_signer_order() {
    let peter = vector("PeterNeumann").unwrap();
    let enoch = vector("EnochRoot").unwrap();

    let signed = sign_text(QUOTE, &[peter.private_key, enoch.private_key]).unwrap();
    let expected = format!("{QUOTE}\n{}{}", peter.quote_signature, enoch.quote_signature);
    assert_eq!(signed.encode(), expected);

    let reparsed = SignedNote::parse(&expected).unwrap();
    assert_eq!(reparsed, signed);
}

#[test]
fn test_partial_key_set_verifies() {
    let peter = vector("PeterNeumann").unwrap();
    let enoch = vector("EnochRoot").unwrap();
    let msg = format!("{QUOTE}\n{}{}", peter.quote_signature, enoch.quote_signature);

    let opened = verify(&msg, &[enoch.public_key]).unwrap();
    assert_eq!(opened.verified().len(), 1);
    assert_eq!(opened.verified()[0].name(), "EnochRoot");
    assert_eq!(opened.unverified().len(), 1);
    assert_eq!(opened.unverified()[0].key_id(), KeyId::from_u32(0xc74f_20a3));
}

#[test]
fn test_vector_signed_by_other_key_is_rejected() {
    let peter = vector("PeterNeumann").unwrap();
    let enoch = vector("EnochRoot").unwrap();

    let err = verify(&peter.signed_quote(), &[enoch.public_key]).unwrap_err();
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
fn test_vectors_deterministic() {
    // Ed25519 signing is deterministic: sign twice, must be identical
    for v in all_vectors() {
        let first = sign_text(QUOTE, &[v.private_key]).unwrap();
        let second = sign_text(QUOTE, &[v.private_key]).unwrap();
        assert_eq!(first, second, "signature not deterministic for {}", v.name);
    }
}

#[test]
fn print_golden_vectors_json() {
    let vectors: Vec<_> = all_vectors()
        .iter()
        .map(|v| {
            json!({
                "name": v.name,
                "seed": v.seed_hex,
                "private_key": v.private_key,
                "public_key": v.public_key,
                "key_id": format!("{:08x}", v.key_id),
                "signed_note": v.signed_quote(),
            })
        })
        .collect();

    let file = json!({
        "description": "Signed-note golden vectors",
        "text": QUOTE,
        "vectors": vectors,
    });
    let out = serde_json::to_string_pretty(&file).unwrap();
    assert!(out.contains("c74f20a3"));
    println!("{out}");
}
