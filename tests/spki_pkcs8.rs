//! End-to-end round-trip and error-contract tests for the X.509 and
//! PKCS#8 envelopes, covering the concrete scenarios these wrap RSA,
//! DSA, and EC keys for.

use hex_literal::hex;
use key_formats::bigint::Integer;
use key_formats::dsa;
use key_formats::ec;
use key_formats::error::Error;
use key_formats::pkcs8::PrivateKeyInfo;
use key_formats::rsa;
use key_formats::x509::SubjectPublicKeyInfo;

fn rsa_public() -> rsa::Public {
    rsa::Public {
        n: Integer::from_u64(3233),
        e: Integer::from_u64(17),
    }
}

fn rsa_private() -> rsa::Private {
    rsa::Private {
        n: Integer::from_u64(3233),
        e: Integer::from_u64(17),
        d: Integer::from_u64(413),
        p: Integer::from_u64(61),
        q: Integer::from_u64(53),
        dp: Integer::from_u64(53),
        dq: Integer::from_u64(49),
        qinv: Integer::from_u64(38),
        other_primes: Vec::new(),
    }
}

#[test]
fn spki_rsa_round_trips() {
    let spki = SubjectPublicKeyInfo::Rsa(rsa_public());
    let encoded = spki.encode();
    assert_eq!(SubjectPublicKeyInfo::decode(&encoded).unwrap(), spki);
}

#[test]
fn spki_dsa_round_trips() {
    let spki = SubjectPublicKeyInfo::Dsa(
        dsa::Params {
            p: Integer::from_u64(23),
            q: Integer::from_u64(11),
            g: Integer::from_u64(4),
        },
        dsa::Public(Integer::from_u64(42)),
    );
    let encoded = spki.encode();
    assert_eq!(SubjectPublicKeyInfo::decode(&encoded).unwrap(), spki);
}

/// EC named curve `secp256r1` wrapped as SPKI with a 65-byte uncompressed
/// point (`04 || X || Y`): round-trips, and the decoded variant carries
/// the point bytes uninterpreted.
#[test]
fn spki_ec_named_curve_with_uncompressed_point_round_trips() {
    let point = hex!(
        "040102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f40"
    );
    assert_eq!(point.len(), 65);

    let secp256r1 = key_formats::ObjectIdentifier::new("1.2.840.10045.3.1.7");
    let spki = SubjectPublicKeyInfo::Ec(ec::Params::Named(secp256r1), ec::Public(point.to_vec()));

    let encoded = spki.encode();
    let decoded = SubjectPublicKeyInfo::decode(&encoded).unwrap();
    assert_eq!(decoded, spki);

    match decoded {
        SubjectPublicKeyInfo::Ec(_, public) => assert_eq!(public.0, point.to_vec()),
        _ => panic!("expected EC variant"),
    }
}

/// An RSA algorithm OID whose `parameters` slot carries something other
/// than `NULL` must fail with [`Error::AlgorithmMismatch`], not be
/// silently accepted.
#[test]
fn spki_rsa_oid_with_non_null_parameters_is_rejected() {
    let rsa_oid = hex!("06 09 2A 86 48 86 F7 0D 01 01 01"); // 1.2.840.113549.1.1.1
    let non_null_params = hex!("02 01 05"); // INTEGER 5, instead of NULL
    let mut alg_body = Vec::new();
    alg_body.extend_from_slice(&rsa_oid);
    alg_body.extend_from_slice(&non_null_params);
    let mut alg_seq = vec![0x30, alg_body.len() as u8];
    alg_seq.extend_from_slice(&alg_body);

    let bit_string = hex!("03 01 00"); // BIT STRING, 0 unused bits, empty payload
    let mut outer_body = alg_seq;
    outer_body.extend_from_slice(&bit_string);

    let mut encoded = vec![0x30, outer_body.len() as u8];
    encoded.extend_from_slice(&outer_body);

    let err = SubjectPublicKeyInfo::decode(&encoded).unwrap_err();
    assert_eq!(err, Error::AlgorithmMismatch);
    assert_eq!(err.to_string(), "Algorithm OID and parameters doesn't match");
}

/// An algorithm OID naming neither RSA, DSA, nor EC (Ed25519) must fail
/// with the generic "no matching algorithm" message.
#[test]
fn spki_unknown_algorithm_fails_to_parse() {
    let ed25519_oid = hex!("06 03 2B 65 70"); // 1.3.101.112
    let mut encoded = vec![0x30]; // outer SEQUENCE, filled in below
    let mut body = Vec::new();
    body.extend_from_slice(&ed25519_oid);
    // minimal AlgorithmIdentifier with no parameters, then an empty
    // BIT STRING subjectPublicKey.
    let mut alg_seq = vec![0x30, body.len() as u8];
    alg_seq.extend_from_slice(&body);
    let bit_string = hex!("03 01 00"); // BIT STRING, 0 unused bits, empty payload
    let mut outer_body = alg_seq;
    outer_body.extend_from_slice(&bit_string);
    encoded.push(outer_body.len() as u8);
    encoded.extend_from_slice(&outer_body);

    let err = SubjectPublicKeyInfo::decode(&encoded).unwrap_err();
    assert_eq!(err, Error::NoMatchingAlgorithm);
    assert_eq!(err.to_string(), "Couldn't parse key");
}

#[test]
fn spki_trailing_byte_is_rejected() {
    let spki = SubjectPublicKeyInfo::Rsa(rsa_public());
    let mut encoded = spki.encode();
    encoded.push(0);
    let err = SubjectPublicKeyInfo::decode(&encoded).unwrap_err();
    assert!(err.to_string().contains("non empty leftover"));
}

#[test]
fn pkcs8_rsa_round_trips() {
    let pki = PrivateKeyInfo::Rsa(rsa_private());
    let encoded = pki.encode();
    assert_eq!(PrivateKeyInfo::decode(&encoded).unwrap(), pki);
}

#[test]
fn pkcs8_ec_round_trips() {
    let pki = PrivateKeyInfo::Ec(
        ec::Params::Named(key_formats::ObjectIdentifier::new("1.2.840.10045.3.1.7")),
        ec::Private {
            k: vec![1, 2, 3, 4, 5],
            params: None,
            public_key: Some(vec![4, 9, 9, 9]),
        },
    );
    let encoded = pki.encode();
    assert_eq!(PrivateKeyInfo::decode(&encoded).unwrap(), pki);
}

/// Attributes present as `[0] IMPLICIT NULL` decode successfully and are
/// discarded; re-encoding the decoded value drops them.
#[test]
fn pkcs8_rsa_with_attributes_decodes_and_drops_them_on_re_encode() {
    let pki = PrivateKeyInfo::Rsa(rsa_private());
    let without_attrs = pki.encode();

    // Splice an `[0] IMPLICIT NULL` (`80 00`) attributes field onto the
    // end of the inner SEQUENCE, adjusting the outer length accordingly.
    assert_eq!(without_attrs[0], 0x30);
    let header_len = 2; // short-form SEQUENCE header: tag + 1 length byte
    let old_body_len = without_attrs[1] as usize;
    assert!(old_body_len < 0x80, "test fixture assumes short-form length");

    let mut with_attrs = Vec::new();
    with_attrs.push(0x30);
    with_attrs.push((old_body_len + 2) as u8);
    with_attrs.extend_from_slice(&without_attrs[header_len..]);
    with_attrs.extend_from_slice(&[0x80, 0x00]);

    let decoded = PrivateKeyInfo::decode(&with_attrs).unwrap();
    assert_eq!(decoded, pki);
    assert_eq!(decoded.encode(), without_attrs);
}

#[test]
fn pkcs8_wrong_outer_version_is_rejected() {
    let pki = PrivateKeyInfo::Rsa(rsa_private());
    let mut encoded = pki.encode();
    // SEQUENCE header (2 bytes, short form), then version INTEGER's tag
    // + length (2 bytes), then its content byte.
    assert_eq!(&encoded[2..4], &[0x02, 0x01]);
    encoded[4] = 1;
    let err = PrivateKeyInfo::decode(&encoded).unwrap_err();
    assert_eq!(err, Error::Pkcs8Version(1));
    assert_eq!(err.to_string(), "PKCS8: version 1 not supported");
}

#[test]
fn pkcs8_trailing_byte_is_rejected() {
    let pki = PrivateKeyInfo::Rsa(rsa_private());
    let mut encoded = pki.encode();
    encoded.push(0xff);
    let err = PrivateKeyInfo::decode(&encoded).unwrap_err();
    assert!(err.to_string().contains("non empty leftover"));
}
