//! Known object identifiers and the [`Algorithm`] enum that classifies
//! them.

use der::asn1::ObjectIdentifier;

/// Parse a dotted-decimal OID literal.
///
/// Only ever called with OID literals fixed at compile time, so a parse
/// failure here would be a bug in this crate, not bad input.
fn oid(s: &str) -> ObjectIdentifier {
    s.parse().expect("invalid built-in OID literal")
}

pub(crate) fn rsa_encryption() -> ObjectIdentifier {
    oid("1.2.840.113549.1.1.1")
}

pub(crate) fn id_dsa() -> ObjectIdentifier {
    oid("1.2.840.10040.4.1")
}

pub(crate) fn id_ec_public_key() -> ObjectIdentifier {
    oid("1.2.840.10045.2.1")
}

pub(crate) fn prime_field() -> ObjectIdentifier {
    oid("1.2.840.10045.1.1")
}

pub(crate) fn characteristic_two_field() -> ObjectIdentifier {
    oid("1.2.840.10045.1.2")
}

pub(crate) fn gn_basis() -> ObjectIdentifier {
    oid("1.2.840.10045.1.2.3.1")
}

pub(crate) fn tp_basis() -> ObjectIdentifier {
    oid("1.2.840.10045.1.2.3.2")
}

pub(crate) fn pp_basis() -> ObjectIdentifier {
    oid("1.2.840.10045.1.2.3.3")
}

/// Discriminated algorithm family, as distinguished by the OID carried in
/// an `AlgorithmIdentifier`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Algorithm {
    /// RSA (`rsaEncryption`, `1.2.840.113549.1.1.1`).
    Rsa,
    /// DSA (`id-dsa`, `1.2.840.10040.4.1`).
    Dsa,
    /// Elliptic curve (`id-ecPublicKey`, `1.2.840.10045.2.1`).
    Ec,
    /// Any other OID. Preserved for diagnostics; unusable for decoding.
    Unknown(ObjectIdentifier),
}

impl Algorithm {
    /// Classify an OID into one of the known families.
    pub fn from_oid(oid: ObjectIdentifier) -> Self {
        if oid == rsa_encryption() {
            Algorithm::Rsa
        } else if oid == id_dsa() {
            Algorithm::Dsa
        } else if oid == id_ec_public_key() {
            Algorithm::Ec
        } else {
            Algorithm::Unknown(oid)
        }
    }

    /// The OID identifying this algorithm family.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Algorithm::Rsa => rsa_encryption(),
            Algorithm::Dsa => id_dsa(),
            Algorithm::Ec => id_ec_public_key(),
            Algorithm::Unknown(oid) => oid.clone(),
        }
    }
}
