//! PKCS#8 `PrivateKeyInfo`.
//!
//! ```text
//! PrivateKeyInfo ::= SEQUENCE {
//!     version              INTEGER,
//!     privateKeyAlgorithm  AlgorithmIdentifier,
//!     privateKey           OCTET STRING,
//!     attributes       [0] IMPLICIT NULL OPTIONAL
//! }
//! ```
//!
//! Structurally this mirrors [`crate::x509`], with two differences: the
//! outer `version` (always `0`) and the `[0] IMPLICIT` `attributes` slot,
//! which this crate only ever reads and discards — a caller supplying
//! attributes has no representation for them, so [`PrivateKeyInfo::encode`]
//! never emits the field.

use der::{Decodable, Decoder, Header, Length, Tag, TagNumber, Tagged};

use crate::algorithm::{self, RawAlgorithmIdentifier};
use crate::asn1util::require_no_trailing;
use crate::dsa;
use crate::ec;
use crate::error::{Error, Result};
use crate::oid::Algorithm;
use crate::rsa;

const CONTEXT: &str = "PKCS8";

/// A parsed `PrivateKeyInfo`, discriminated by algorithm family.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrivateKeyInfo {
    /// RSA private key.
    Rsa(rsa::Private),
    /// DSA domain parameters and private key value.
    Dsa(dsa::Params, dsa::Private),
    /// EC domain parameters and private key.
    Ec(ec::Params, ec::Private),
}

impl PrivateKeyInfo {
    /// DER-encode as a `PrivateKeyInfo` SEQUENCE. `attributes` is always
    /// omitted.
    pub fn encode(&self) -> Vec<u8> {
        encode_pki(self).expect("PrivateKeyInfo fields always encode")
    }

    /// BER-decode a `PrivateKeyInfo` SEQUENCE.
    ///
    /// Peeks the `privateKeyAlgorithm` OID and dispatches directly to the
    /// matching family. Returns [`Error::Pkcs8Version`] if the outer
    /// `version` is not `0`, and [`Error::NoMatchingAlgorithm`] if the OID
    /// names none of RSA, DSA, or EC. Any `attributes` present are parsed
    /// (to confirm they are well-formed) and discarded.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT)?;
        decode_pki(bytes)
    }
}

/// Marker for the `[0] IMPLICIT NULL` `attributes` slot: a context-specific
/// primitive tag retagging `NULL` directly, with no nested inner TLV, unlike
/// the `[0]`/`[1] EXPLICIT` wrappers EC private keys use.
struct DiscardedAttributes;

impl Tagged for DiscardedAttributes {
    const TAG: Tag = Tag::ContextSpecific {
        constructed: false,
        number: TagNumber(0),
    };
}

impl<'a> Decodable<'a> for DiscardedAttributes {
    fn decode(decoder: &mut Decoder<'a>) -> der::Result<Self> {
        let header = Header::decode(decoder)?;
        header.tag.assert_eq(Self::TAG)?;
        if header.length != Length::ZERO {
            return Err(header.tag.length_error());
        }
        Ok(DiscardedAttributes)
    }
}

fn decode_pki(bytes: &[u8]) -> Result<PrivateKeyInfo> {
    let mut decoder = Decoder::new(bytes);

    let (version, algorithm, private_key): (u8, RawAlgorithmIdentifier, Vec<u8>) = decoder
        .sequence(|decoder| {
            let version: u8 = decoder.decode()?;
            let algorithm: RawAlgorithmIdentifier = decoder.decode()?;
            let private_key = decoder.octet_string()?.as_bytes().to_vec();
            let _attributes: Option<DiscardedAttributes> = decoder.optional()?;
            Ok((version, algorithm, private_key))
        })
        .map_err(Error::from)?;

    if version != 0 {
        return Err(Error::Pkcs8Version(version as u32));
    }

    match Algorithm::from_oid(algorithm.algorithm.clone()) {
        Algorithm::Rsa => {
            algorithm::expect_rsa(&algorithm)?;
            let private = rsa::Private::decode(&private_key)?;
            Ok(PrivateKeyInfo::Rsa(private))
        }
        Algorithm::Dsa => {
            let params = algorithm::expect_dsa(&algorithm)?;
            let private = dsa::Private::decode(&private_key)?;
            Ok(PrivateKeyInfo::Dsa(params, private))
        }
        Algorithm::Ec => {
            let params = algorithm::expect_ec(&algorithm)?;
            let private = ec::Private::decode(&private_key)?;
            Ok(PrivateKeyInfo::Ec(params, private))
        }
        Algorithm::Unknown(_) => Err(Error::NoMatchingAlgorithm),
    }
}

fn encode_pki(pki: &PrivateKeyInfo) -> der::Result<Vec<u8>> {
    let (oid, params_der, key_bytes) = match pki {
        PrivateKeyInfo::Rsa(private) => {
            (rsa::algorithm_oid(), rsa::Params.encode(), private.encode())
        }
        PrivateKeyInfo::Dsa(params, private) => {
            (dsa::algorithm_oid(), params.encode(), private.encode())
        }
        PrivateKeyInfo::Ec(params, private) => {
            (ec::algorithm_oid(), params.encode(), private.encode())
        }
    };

    let algorithm = algorithm::build(oid, Some(&params_der))?;

    #[derive(der::Message)]
    struct Wire<'a> {
        version: u8,
        algorithm: RawAlgorithmIdentifier<'a>,
        private_key: der::asn1::OctetString<'a>,
    }

    Wire {
        version: 0,
        algorithm,
        private_key: der::asn1::OctetString::new(&key_bytes)?,
    }
    .to_vec()
}
