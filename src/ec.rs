//! Elliptic-curve keys and domain parameters, per RFC 5480 and SEC1.
//!
//! ```text
//! FieldID ::= SEQUENCE {
//!     fieldType   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY fieldType
//! }
//!
//! Characteristic-two-params ::= SEQUENCE {
//!     m           INTEGER,
//!     basis       OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY basis
//! }
//!
//! Curve ::= SEQUENCE {
//!     a     OCTET STRING,
//!     b     OCTET STRING,
//!     seed  BIT STRING OPTIONAL
//! }
//!
//! ECParameters ::= SEQUENCE {
//!     version   INTEGER { ecpVer1(1) },
//!     fieldID   FieldID,
//!     curve     Curve,
//!     base      OCTET STRING,
//!     order     INTEGER,
//!     cofactor  INTEGER OPTIONAL
//! }
//!
//! ECParameters ::= CHOICE {
//!     namedCurve  OBJECT IDENTIFIER,
//!     implicitCA  NULL,
//!     specified   SpecifiedECDomain  -- the SEQUENCE above
//! }
//!
//! ECPrivateKey ::= SEQUENCE {
//!     version        INTEGER { ecPrivkeyVer1(1) },
//!     privateKey     OCTET STRING,
//!     parameters [0] ECParameters OPTIONAL,
//!     publicKey  [1] BIT STRING OPTIONAL
//! }
//! ```

use core::convert::TryFrom;
use der::{
    asn1::{Any, BitString, ObjectIdentifier, OctetString},
    Decodable, Decoder, Encodable, Encoder, Header, Length, Message, Tag, Tagged,
};

use crate::asn1util::{any_as, require_no_trailing, ExplicitContext0, ExplicitContext1};
use crate::bigint::Integer;
use crate::error::{Error, Result};
use crate::oid::{
    characteristic_two_field, gn_basis, id_ec_public_key, pp_basis, prime_field, tp_basis,
};

const CONTEXT_PARAMS: &str = "EC parameters";
const CONTEXT_PUBLIC: &str = "EC public key";
const CONTEXT_PRIVATE: &str = "EC private key";

/// `FieldID`'s `fieldType`/`parameters` pair, structurally: the OID picks
/// the shape of `parameters`, validated in [`decode_field`].
#[derive(Message)]
struct RawField<'a> {
    field_type: ObjectIdentifier,
    parameters: Any<'a>,
}

#[derive(Message)]
struct RawCharTwo<'a> {
    m: Integer,
    basis: ObjectIdentifier,
    parameters: Any<'a>,
}

#[derive(Message)]
struct RawPentanomial {
    k1: Integer,
    k2: Integer,
    k3: Integer,
}

#[derive(Message)]
struct RawCurve<'a> {
    a: OctetString<'a>,
    b: OctetString<'a>,
    seed: Option<BitString<'a>>,
}

#[derive(Message)]
struct RawSpecifiedDomain<'a> {
    version: u8,
    field: RawField<'a>,
    curve: RawCurve<'a>,
    base: OctetString<'a>,
    order: Integer,
    cofactor: Option<Integer>,
}

/// The basis a characteristic-two `Field` uses to represent its
/// elements.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Basis {
    /// Gaussian normal basis. Carries no parameters.
    GaussianNormal,
    /// Trinomial basis `x^m + x^k + 1`.
    Trinomial(Integer),
    /// Pentanomial basis `x^m + x^k1 + x^k2 + x^k3 + 1`.
    Pentanomial(Integer, Integer, Integer),
}

/// The field an elliptic curve is defined over.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Field {
    /// A prime field `GF(p)`.
    Prime(Integer),
    /// A characteristic-two (binary) field `GF(2^m)`.
    CharacteristicTwo {
        /// The field's degree, `m`.
        m: Integer,
        /// Polynomial basis.
        basis: Basis,
    },
}

/// `Curve`: the `a`/`b` coefficients and optional seed of a
/// `SpecifiedECDomain`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Curve {
    /// Field-element encoding of coefficient `a`.
    pub a: Vec<u8>,
    /// Field-element encoding of coefficient `b`.
    pub b: Vec<u8>,
    /// Optional seed used to generate `a`/`b` verifiably at random.
    pub seed: Option<Vec<u8>>,
}

/// A fully specified (rather than named) elliptic-curve domain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecifiedDomain {
    /// The underlying field.
    pub field: Field,
    /// The curve equation's coefficients.
    pub curve: Curve,
    /// Encoded base point (generator).
    pub base: Vec<u8>,
    /// Order of the base point.
    pub order: Integer,
    /// Cofactor of the curve, if given.
    pub cofactor: Option<Integer>,
}

/// `ECParameters`/`ECPrivateKeyParameters`: how an EC domain is conveyed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Params {
    /// A named curve, identified by OID (e.g. `secp256r1`).
    Named(ObjectIdentifier),
    /// Domain parameters are implied by context (`implicitCA`).
    Implicit,
    /// A fully specified domain.
    Specified(SpecifiedDomain),
}

impl Params {
    /// DER-encode as an `ECParameters` CHOICE value.
    pub fn encode(&self) -> Vec<u8> {
        encode_params(self).expect("EC parameters always encode")
    }

    /// BER-decode an `ECParameters` CHOICE value.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PARAMS)?;
        let any = Any::try_from(bytes).map_err(Error::from)?;
        Params::from_any(&any)
    }

    /// Decode from an already-parsed `ANY`. Used both by
    /// [`crate::algorithm::expect_ec`] and, recursively, wherever an
    /// embedded `ECParameters` CHOICE appears (e.g. an EC private key's
    /// `[0]` field).
    pub(crate) fn from_any(any: &Any<'_>) -> Result<Self> {
        match any.tag() {
            Tag::ObjectIdentifier => {
                let oid: ObjectIdentifier = any_as(any).map_err(Error::from)?;
                Ok(Params::Named(oid))
            }
            Tag::Null => Ok(Params::Implicit),
            Tag::Sequence => Ok(Params::Specified(decode_specified_domain_any(any)?)),
            _ => Err(Error::EcParamsMismatch),
        }
    }
}

fn encode_params(params: &Params) -> der::Result<Vec<u8>> {
    match params {
        Params::Named(oid) => oid.to_vec(),
        Params::Implicit => ().to_vec(),
        Params::Specified(domain) => encode_specified_domain(domain),
    }
}

fn decode_specified_domain_any(any: &Any<'_>) -> Result<SpecifiedDomain> {
    let raw: RawSpecifiedDomain = any
        .sequence(|decoder| decoder.decode())
        .map_err(Error::from)?;

    if raw.version != 1 {
        return Err(Error::EcSpecifiedDomainVersion(raw.version as u32));
    }

    let field = decode_field(raw.field)?;
    let curve = Curve {
        a: raw.curve.a.as_bytes().to_vec(),
        b: raw.curve.b.as_bytes().to_vec(),
        seed: raw.curve.seed.map(|bs| bs.as_bytes().to_vec()),
    };

    Ok(SpecifiedDomain {
        field,
        curve,
        base: raw.base.as_bytes().to_vec(),
        order: raw.order,
        cofactor: raw.cofactor,
    })
}

fn encode_specified_domain(domain: &SpecifiedDomain) -> der::Result<Vec<u8>> {
    let (field_type, field_params_bytes) = encode_field_params(&domain.field)?;
    let field_params = Any::try_from(field_params_bytes.as_slice())?;
    let field = RawField {
        field_type,
        parameters: field_params,
    };

    let seed = domain.curve.seed.as_deref().map(BitString::new).transpose()?;
    let curve = RawCurve {
        a: OctetString::new(&domain.curve.a)?,
        b: OctetString::new(&domain.curve.b)?,
        seed,
    };

    RawSpecifiedDomain {
        version: 1,
        field,
        curve,
        base: OctetString::new(&domain.base)?,
        order: domain.order.clone(),
        cofactor: domain.cofactor.clone(),
    }
    .to_vec()
}

fn decode_field(raw: RawField<'_>) -> Result<Field> {
    if raw.field_type == prime_field() {
        let p: Integer = any_as(&raw.parameters).map_err(|_| Error::FieldTypeMismatch)?;
        Ok(Field::Prime(p))
    } else if raw.field_type == characteristic_two_field() {
        let raw_c2: RawCharTwo = raw
            .parameters
            .sequence(|decoder| decoder.decode())
            .map_err(|_| Error::FieldTypeMismatch)?;
        let basis = decode_basis(raw_c2.basis, raw_c2.parameters)?;
        Ok(Field::CharacteristicTwo {
            m: raw_c2.m,
            basis,
        })
    } else {
        Err(Error::FieldTypeMismatch)
    }
}

fn decode_basis(oid: ObjectIdentifier, params: Any<'_>) -> Result<Basis> {
    if oid == gn_basis() {
        if params.tag() == Tag::Null {
            Ok(Basis::GaussianNormal)
        } else {
            Err(Error::FieldBasisMismatch)
        }
    } else if oid == tp_basis() {
        let k: Integer = any_as(&params).map_err(|_| Error::FieldBasisMismatch)?;
        Ok(Basis::Trinomial(k))
    } else if oid == pp_basis() {
        let raw: RawPentanomial = params
            .sequence(|decoder| decoder.decode())
            .map_err(|_| Error::FieldBasisMismatch)?;
        Ok(Basis::Pentanomial(raw.k1, raw.k2, raw.k3))
    } else {
        Err(Error::FieldBasisMismatch)
    }
}

fn encode_field_params(field: &Field) -> der::Result<(ObjectIdentifier, Vec<u8>)> {
    match field {
        Field::Prime(p) => Ok((prime_field(), p.to_vec()?)),
        Field::CharacteristicTwo { m, basis } => {
            let (basis_oid, basis_params_bytes) = encode_basis(basis)?;
            let basis_params = Any::try_from(basis_params_bytes.as_slice())?;

            let bytes = RawCharTwo {
                m: m.clone(),
                basis: basis_oid,
                parameters: basis_params,
            }
            .to_vec()?;

            Ok((characteristic_two_field(), bytes))
        }
    }
}

fn encode_basis(basis: &Basis) -> der::Result<(ObjectIdentifier, Vec<u8>)> {
    match basis {
        Basis::GaussianNormal => Ok((gn_basis(), ().to_vec()?)),
        Basis::Trinomial(k) => Ok((tp_basis(), k.to_vec()?)),
        Basis::Pentanomial(k1, k2, k3) => {
            let bytes = RawPentanomial {
                k1: k1.clone(),
                k2: k2.clone(),
                k3: k3.clone(),
            }
            .to_vec()?;
            Ok((pp_basis(), bytes))
        }
    }
}

/// A bare EC public key: the encoded curve point, uninterpreted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Public(pub Vec<u8>);

impl Public {
    /// DER-encode as an `OCTET STRING`.
    pub fn encode(&self) -> Vec<u8> {
        OctetString::new(&self.0)
            .and_then(|os| os.to_vec())
            .expect("EC public key always encodes")
    }

    /// BER-decode an `OCTET STRING` containing the point.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PUBLIC)?;
        let os = OctetString::from_der(bytes).map_err(Error::from)?;
        Ok(Public(os.as_bytes().to_vec()))
    }
}

/// A bare EC private key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Private {
    /// Private scalar.
    pub k: Vec<u8>,
    /// Domain parameters, if carried inline.
    pub params: Option<Params>,
    /// Encoded public point, if carried inline.
    pub public_key: Option<Vec<u8>>,
}

impl Private {
    /// DER-encode as an `ECPrivateKey` SEQUENCE.
    pub fn encode(&self) -> Vec<u8> {
        encode_private(self).expect("EC private key fields always encode")
    }

    /// BER-decode an `ECPrivateKey` SEQUENCE.
    ///
    /// Returns [`Error::EcPrivateKeyVersion`] if `version` is not `1`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PRIVATE)?;
        decode_private(bytes)
    }
}

fn decode_private(bytes: &[u8]) -> Result<Private> {
    let mut decoder = Decoder::new(bytes);

    let (version, k, params_any, public_key): (u8, Vec<u8>, Option<Any>, Option<Vec<u8>>) =
        decoder
            .sequence(|decoder| {
                let version: u8 = decoder.decode()?;
                let k = decoder.octet_string()?.as_bytes().to_vec();
                let params_any: Option<Any> =
                    decoder.context_specific_optional(0, |dec| dec.decode())?;
                let public_key: Option<Vec<u8>> = decoder
                    .context_specific_optional(1, |dec| {
                        dec.bit_string().map(|bs| bs.as_bytes().to_vec())
                    })?;
                Ok((version, k, params_any, public_key))
            })
            .map_err(Error::from)?;

    if version != 1 {
        return Err(Error::EcPrivateKeyVersion(version as u32));
    }

    let params = params_any.as_ref().map(Params::from_any).transpose()?;

    Ok(Private {
        k,
        params,
        public_key,
    })
}

fn encode_private(key: &Private) -> der::Result<Vec<u8>> {
    let private_key = OctetString::new(&key.k)?;

    let params_bytes = key.params.as_ref().map(encode_params).transpose()?;
    let params_any = params_bytes
        .as_deref()
        .map(Any::try_from)
        .transpose()?;

    let pubkey_tlv = key
        .public_key
        .as_deref()
        .map(BitString::new)
        .transpose()?
        .map(|bs| bs.to_vec())
        .transpose()?;
    let pubkey_any = pubkey_tlv.as_deref().map(Any::try_from).transpose()?;

    // `ExplicitContext0`/`ExplicitContext1` are `Encodable` only (no
    // `Decodable`), and `Message` is bounded on `Decodable`, so this struct
    // can't derive or implement `Message` even though it's only ever
    // encoded. `Tagged`/`Encodable` are implemented by hand instead, the
    // same way `asn1util`'s context wrappers compose a `SEQUENCE` out of
    // `Header` plus each field's own encoding.
    struct Wire<'a> {
        version: u8,
        private_key: OctetString<'a>,
        parameters: Option<ExplicitContext0<'a>>,
        public_key: Option<ExplicitContext1<'a>>,
    }

    impl<'a> Wire<'a> {
        fn body_len(&self) -> der::Result<Length> {
            let len = self.version.encoded_len()?;
            let len = (len + self.private_key.encoded_len()?)?;
            let len = (len + self.parameters.encoded_len()?)?;
            (len + self.public_key.encoded_len()?)
        }
    }

    impl<'a> Tagged for Wire<'a> {
        const TAG: Tag = Tag::Sequence;
    }

    impl<'a> Encodable for Wire<'a> {
        fn encoded_len(&self) -> der::Result<Length> {
            let body = self.body_len()?;
            (Header::new(Self::TAG, body)?.encoded_len()? + body)
        }

        fn encode(&self, encoder: &mut Encoder<'_>) -> der::Result<()> {
            Header::new(Self::TAG, self.body_len()?)?.encode(encoder)?;
            self.version.encode(encoder)?;
            self.private_key.encode(encoder)?;
            self.parameters.encode(encoder)?;
            self.public_key.encode(encoder)
        }
    }

    Wire {
        version: 1,
        private_key,
        parameters: params_any.map(ExplicitContext0),
        public_key: pubkey_any.map(ExplicitContext1),
    }
    .to_vec()
}

/// The `id-ecPublicKey` algorithm OID, for callers assembling their own
/// `AlgorithmIdentifier`.
pub fn algorithm_oid() -> ObjectIdentifier {
    id_ec_public_key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn secp256r1() -> ObjectIdentifier {
        ObjectIdentifier::new("1.2.840.10045.3.1.7")
    }

    #[test]
    fn named_params_round_trip() {
        let params = Params::Named(secp256r1());
        assert_eq!(Params::decode(&params.encode()).unwrap(), params);
    }

    #[test]
    fn implicit_params_round_trip() {
        let params = Params::Implicit;
        assert_eq!(Params::decode(&params.encode()).unwrap(), params);
    }

    #[test]
    fn specified_domain_round_trips() {
        let domain = SpecifiedDomain {
            field: Field::Prime(Integer::from_u64(23)),
            curve: Curve {
                a: vec![1, 2, 3],
                b: vec![4, 5, 6],
                seed: Some(vec![7, 8]),
            },
            base: vec![4, 9, 9],
            order: Integer::from_u64(29),
            cofactor: Some(Integer::from_u64(1)),
        };
        let params = Params::Specified(domain);
        assert_eq!(Params::decode(&params.encode()).unwrap(), params);
    }

    #[test]
    fn characteristic_two_trinomial_round_trips() {
        let domain = SpecifiedDomain {
            field: Field::CharacteristicTwo {
                m: Integer::from_u64(163),
                basis: Basis::Trinomial(Integer::from_u64(7)),
            },
            curve: Curve {
                a: vec![0],
                b: vec![1],
                seed: None,
            },
            base: vec![2, 3],
            order: Integer::from_u64(17),
            cofactor: None,
        };
        let params = Params::Specified(domain);
        assert_eq!(Params::decode(&params.encode()).unwrap(), params);
    }

    #[test]
    fn specified_domain_wrong_version_is_rejected() {
        let domain = SpecifiedDomain {
            field: Field::Prime(Integer::from_u64(23)),
            curve: Curve {
                a: vec![1],
                b: vec![2],
                seed: None,
            },
            base: vec![3],
            order: Integer::from_u64(5),
            cofactor: None,
        };
        let mut encoded = encode_specified_domain(&domain).unwrap();
        // SEQUENCE header (2 bytes), then version INTEGER's tag + length
        // (2 bytes), then its single content byte.
        assert_eq!(&encoded[2..4], &[0x02, 0x01]);
        encoded[4] = 2;
        assert_eq!(
            Params::decode(&encoded).unwrap_err(),
            Error::EcSpecifiedDomainVersion(2)
        );
    }

    #[test]
    fn secp256r1_public_key_round_trips_as_uncompressed_point() {
        let point = hex!(
            "040102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f40"
        );
        assert_eq!(point.len(), 65);
        let public = Public(point.to_vec());
        assert_eq!(Public::decode(&public.encode()).unwrap(), public);
    }

    #[test]
    fn private_key_without_optional_fields_round_trips() {
        let sk = Private {
            k: vec![1, 2, 3, 4],
            params: None,
            public_key: None,
        };
        assert_eq!(Private::decode(&sk.encode()).unwrap(), sk);
    }

    #[test]
    fn private_key_with_named_params_and_public_key_round_trips() {
        let sk = Private {
            k: vec![9, 9, 9],
            params: Some(Params::Named(secp256r1())),
            public_key: Some(vec![4, 1, 2, 3]),
        };
        assert_eq!(Private::decode(&sk.encode()).unwrap(), sk);
    }

    #[test]
    fn private_key_wrong_version_is_rejected() {
        let sk = Private {
            k: vec![1],
            params: None,
            public_key: None,
        };
        let mut encoded = sk.encode();
        // SEQUENCE header (tag + length, 2 bytes), then version INTEGER's
        // own tag + length (2 bytes), then its single content byte.
        assert_eq!(&encoded[2..4], &[0x02, 0x01]);
        encoded[4] = 2;
        assert_eq!(
            Private::decode(&encoded).unwrap_err(),
            Error::EcPrivateKeyVersion(2)
        );
    }

    #[test]
    fn field_type_basis_mismatch_is_rejected() {
        // A characteristic-two field whose basis OID claims trinomial but
        // whose parameters are a NULL (gaussian-normal's shape).
        let raw_c2 = RawCharTwo {
            m: Integer::from_u64(5),
            basis: tp_basis(),
            parameters: Any::try_from(&hex!("0500")[..]).unwrap(),
        };
        let field_params = raw_c2.to_vec().unwrap();
        let raw_field = RawField {
            field_type: characteristic_two_field(),
            parameters: Any::try_from(field_params.as_slice()).unwrap(),
        };
        assert_eq!(decode_field(raw_field).unwrap_err(), Error::FieldBasisMismatch);
    }
}
