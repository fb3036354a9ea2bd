//! X.509 `SubjectPublicKeyInfo`.
//!
//! ```text
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING
//! }
//! ```
//!
//! `algorithm` picks which of RSA, DSA, or EC the `subjectPublicKey` bytes
//! are parsed as. For RSA and DSA the bit-string payload is itself a
//! complete ASN.1 structure and is re-parsed recursively; for EC it is the
//! raw encoded curve point and is returned uninterpreted, per RFC 5480.

use der::{asn1::BitString, Decodable, Decoder, Encodable, Message};

use crate::algorithm::{self, RawAlgorithmIdentifier};
use crate::asn1util::require_no_trailing;
use crate::dsa;
use crate::ec;
use crate::error::{Error, Result};
use crate::oid::Algorithm;
use crate::rsa;

const CONTEXT: &str = "X509";

/// A parsed `SubjectPublicKeyInfo`, discriminated by algorithm family.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubjectPublicKeyInfo {
    /// RSA public key.
    Rsa(rsa::Public),
    /// DSA domain parameters and public key value.
    Dsa(dsa::Params, dsa::Public),
    /// EC domain parameters and encoded public point.
    Ec(ec::Params, ec::Public),
}

impl SubjectPublicKeyInfo {
    /// DER-encode as a `SubjectPublicKeyInfo` SEQUENCE.
    pub fn encode(&self) -> Vec<u8> {
        encode_spki(self).expect("SubjectPublicKeyInfo fields always encode")
    }

    /// BER-decode a `SubjectPublicKeyInfo` SEQUENCE.
    ///
    /// Peeks the `algorithm` OID in the outer `AlgorithmIdentifier` and
    /// dispatches directly to the matching family, rather than trying each
    /// grammar in turn; the observable success/failure contract is the
    /// same either way since the three OIDs are disjoint. Returns
    /// [`Error::NoMatchingAlgorithm`] if the OID names none of them.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT)?;
        decode_spki(bytes)
    }
}

#[derive(Message)]
struct Wire<'a> {
    algorithm: RawAlgorithmIdentifier<'a>,
    subject_public_key: BitString<'a>,
}

fn decode_spki(bytes: &[u8]) -> Result<SubjectPublicKeyInfo> {
    let mut decoder = Decoder::new(bytes);
    let raw: Wire = decoder.decode().map_err(Error::from)?;

    match Algorithm::from_oid(raw.algorithm.algorithm.clone()) {
        Algorithm::Rsa => {
            algorithm::expect_rsa(&raw.algorithm)?;
            let public = rsa::Public::decode(raw.subject_public_key.as_bytes())?;
            Ok(SubjectPublicKeyInfo::Rsa(public))
        }
        Algorithm::Dsa => {
            let params = algorithm::expect_dsa(&raw.algorithm)?;
            let public = dsa::Public::decode(raw.subject_public_key.as_bytes())?;
            Ok(SubjectPublicKeyInfo::Dsa(params, public))
        }
        Algorithm::Ec => {
            let params = algorithm::expect_ec(&raw.algorithm)?;
            let public = ec::Public(raw.subject_public_key.as_bytes().to_vec());
            Ok(SubjectPublicKeyInfo::Ec(params, public))
        }
        Algorithm::Unknown(_) => Err(Error::NoMatchingAlgorithm),
    }
}

fn encode_spki(spki: &SubjectPublicKeyInfo) -> der::Result<Vec<u8>> {
    let (oid, params_der, key_bytes) = match spki {
        SubjectPublicKeyInfo::Rsa(public) => {
            (rsa::algorithm_oid(), rsa::Params.encode(), public.encode())
        }
        SubjectPublicKeyInfo::Dsa(params, public) => {
            (dsa::algorithm_oid(), params.encode(), public.encode())
        }
        SubjectPublicKeyInfo::Ec(params, public) => {
            (ec::algorithm_oid(), params.encode(), public.0.clone())
        }
    };

    let algorithm = algorithm::build(oid, Some(&params_der))?;
    let subject_public_key = BitString::new(&key_bytes)?;

    Wire {
        algorithm,
        subject_public_key,
    }
    .to_vec()
}
