//! Pure Rust implementation of ASN.1 DER/BER encoding and decoding for
//! RSA, DSA, and elliptic-curve key material, including the X.509
//! [`SubjectPublicKeyInfo`] and PKCS#8 [`PrivateKeyInfo`] envelopes.
//!
//! # About this crate
//! This crate covers the key formats themselves, not the cryptography
//! built on top of them: it has no notion of signing, verification, key
//! agreement, or key generation, and performs no validation of a key's
//! mathematical consistency (e.g. that an RSA modulus actually factors
//! into the given primes). Given DER or BER bytes, it produces typed
//! values; given typed values, it produces canonical DER bytes.
//!
//! It supports decoding/encoding the following types:
//!
//! - [`rsa::Public`] / [`rsa::Private`]: bare PKCS#1 RSA keys.
//! - [`dsa::Params`] / [`dsa::Public`] / [`dsa::Private`]: bare DSA keys
//!   and domain parameters.
//! - [`ec::Params`] / [`ec::Public`] / [`ec::Private`]: bare elliptic-curve
//!   keys and domain parameters, per RFC 5480 / SEC1.
//! - [`x509::SubjectPublicKeyInfo`]: the X.509 public-key envelope,
//!   dispatching over the three families above.
//! - [`pkcs8::PrivateKeyInfo`]: the PKCS#8 private-key envelope,
//!   dispatching the same way.
//!
//! # Decoding is permissive, encoding is canonical
//! Decoding accepts BER, the permissive superset of DER; encoding always
//! produces DER. Two encodings of equal values are therefore guaranteed
//! to compare equal as byte strings, but re-encoding a BER input is not
//! guaranteed to reproduce the original bytes.
//!
//! # Errors
//! Every `decode` returns [`error::Result`]; there is no panicking
//! entry point into this crate for untrusted input. See [`error::Error`]
//! for the full taxonomy (malformed ASN.1, structural mismatches,
//! semantic mismatches such as an algorithm OID disagreeing with its
//! parameters, unsupported `version` fields, and trailing data).
//!
//! # Minimum Supported Rust Version
//! This crate requires **Rust 1.46** at a minimum.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

mod algorithm;
mod asn1util;

pub mod bigint;
pub mod dsa;
pub mod ec;
pub mod error;
pub mod oid;
pub mod pkcs8;
pub mod rsa;
pub mod x509;

pub use crate::{
    bigint::Integer,
    error::{Error, Result},
    oid::Algorithm,
    pkcs8::PrivateKeyInfo,
    x509::SubjectPublicKeyInfo,
};
pub use der::{self, asn1::ObjectIdentifier};
