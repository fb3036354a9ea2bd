//! Bare PKCS#1 RSA keys.
//!
//! ```text
//! RSAPublicKey ::= SEQUENCE {
//!     modulus           INTEGER,  -- n
//!     publicExponent    INTEGER   -- e
//! }
//!
//! RSAPrivateKey ::= SEQUENCE {
//!     version           Version,
//!     modulus           INTEGER,  -- n
//!     publicExponent    INTEGER,  -- e
//!     privateExponent   INTEGER,  -- d
//!     prime1            INTEGER,  -- p
//!     prime2            INTEGER,  -- q
//!     exponent1         INTEGER,  -- d mod (p-1)
//!     exponent2         INTEGER,  -- d mod (q-1)
//!     coefficient       INTEGER,  -- (inverse of q) mod p
//!     otherPrimeInfos   OtherPrimeInfos OPTIONAL
//! }
//!
//! OtherPrimeInfos ::= SEQUENCE SIZE(1..MAX) OF OtherPrimeInfo
//!
//! OtherPrimeInfo ::= SEQUENCE {
//!     prime             INTEGER,  -- ri
//!     exponent          INTEGER,  -- di
//!     coefficient       INTEGER   -- ti
//! }
//! ```

use der::{asn1::ObjectIdentifier, Decodable, Decoder, Encodable, Encoder, Header, Length, Message, Tag, Tagged};

use crate::asn1util::require_no_trailing;
use crate::bigint::Integer;
use crate::error::{Error, Result};
use crate::oid::rsa_encryption;

const CONTEXT_PARAMS: &str = "RSA parameters";
const CONTEXT_PUBLIC: &str = "RSA";
const CONTEXT_PRIVATE: &str = "RSA private key";

/// `RSAPublicKey`'s algorithm parameters: always absent content, i.e.
/// ASN.1 `NULL`. Exists purely to occupy the `parameters` slot of an
/// RSA `AlgorithmIdentifier`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Params;

impl Params {
    /// DER-encode as `NULL`.
    pub fn encode(&self) -> Vec<u8> {
        ().to_vec().expect("NULL always encodes")
    }

    /// BER-decode a `NULL`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PARAMS)?;
        <()>::from_der(bytes).map_err(Error::from)?;
        Ok(Params)
    }
}

/// A bare PKCS#1 RSA public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Public {
    /// Modulus.
    pub n: Integer,
    /// Public exponent.
    pub e: Integer,
}

#[derive(Clone, Message)]
struct RawPublic {
    n: Integer,
    e: Integer,
}

impl Public {
    /// DER-encode as a PKCS#1 `RSAPublicKey` SEQUENCE.
    pub fn encode(&self) -> Vec<u8> {
        RawPublic {
            n: self.n.clone(),
            e: self.e.clone(),
        }
        .to_vec()
        .expect("RSA public key fields always encode")
    }

    /// BER-decode a PKCS#1 `RSAPublicKey` SEQUENCE.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PUBLIC)?;
        let raw = RawPublic::from_der(bytes).map_err(Error::from)?;
        Ok(Public {
            n: raw.n,
            e: raw.e,
        })
    }
}

/// One entry of a multi-prime RSA private key's `otherPrimeInfos`.
#[derive(Clone, Debug, Eq, PartialEq, Message)]
pub struct OtherPrimeInfo {
    /// Additional prime factor.
    pub r: Integer,
    /// `d mod (r - 1)`.
    pub d: Integer,
    /// CRT coefficient for this prime.
    pub t: Integer,
}

/// `OtherPrimeInfos ::= SEQUENCE SIZE(1..MAX) OF OtherPrimeInfo`.
///
/// `der`'s `Message` derive expects a fixed field shape, not a
/// variable-length repetition, so the SEQUENCE OF is implemented here
/// by hand: decode walks the inner sequence until it is exhausted,
/// encode sums up the members' lengths the same way
/// [`crate::bigint::Integer`]'s wire form does.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct OtherPrimeInfos(Vec<OtherPrimeInfo>);

impl Tagged for OtherPrimeInfos {
    const TAG: Tag = Tag::Sequence;
}

impl<'a> Decodable<'a> for OtherPrimeInfos {
    fn decode(decoder: &mut Decoder<'a>) -> der::Result<Self> {
        decoder.sequence(|decoder| {
            let mut items = Vec::new();
            while !decoder.is_finished() {
                items.push(decoder.decode()?);
            }
            Ok(OtherPrimeInfos(items))
        })
    }
}

impl Encodable for OtherPrimeInfos {
    fn encoded_len(&self) -> der::Result<Length> {
        let mut body = Length::ZERO;
        for item in &self.0 {
            body = (body + item.encoded_len()?)?;
        }
        Header::new(Self::TAG, body)?.encoded_len()? + body
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> der::Result<()> {
        let mut body = Length::ZERO;
        for item in &self.0 {
            body = (body + item.encoded_len()?)?;
        }
        Header::new(Self::TAG, body)?.encode(encoder)?;
        for item in &self.0 {
            item.encode(encoder)?;
        }
        Ok(())
    }
}

/// A bare PKCS#1 RSA private key.
///
/// `other_primes` is empty for an ordinary two-prime key. Decoding
/// enforces that the wire `version` (`0` or `1`) agrees with whether
/// `otherPrimeInfos` is present; [`Public::encode`]-style asymmetry does
/// not apply here because [`Private::encode`] always reflects whatever
/// `other_primes` actually holds (see the module docs on the open
/// question this resolves).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Private {
    /// Modulus.
    pub n: Integer,
    /// Public exponent.
    pub e: Integer,
    /// Private exponent.
    pub d: Integer,
    /// First prime factor.
    pub p: Integer,
    /// Second prime factor.
    pub q: Integer,
    /// `d mod (p - 1)`.
    pub dp: Integer,
    /// `d mod (q - 1)`.
    pub dq: Integer,
    /// `(inverse of q) mod p`.
    pub qinv: Integer,
    /// Additional primes beyond `p` and `q`, for multi-prime keys.
    pub other_primes: Vec<OtherPrimeInfo>,
}

impl Private {
    /// DER-encode as a PKCS#1 `RSAPrivateKey` SEQUENCE.
    ///
    /// Emits `version = 0` with `otherPrimeInfos` omitted when
    /// `other_primes` is empty, and `version = 1` with the full list
    /// otherwise.
    pub fn encode(&self) -> Vec<u8> {
        encode_private(self).expect("RSA private key fields always encode")
    }

    /// BER-decode a PKCS#1 `RSAPrivateKey` SEQUENCE.
    ///
    /// Returns [`Error::RsaVersionInconsistent`] if the wire `version`
    /// disagrees with whether `otherPrimeInfos` is present.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PRIVATE)?;
        decode_private(bytes)
    }
}

fn encode_private(key: &Private) -> der::Result<Vec<u8>> {
    let version: u8 = if key.other_primes.is_empty() { 0 } else { 1 };

    // `Message` composition needs same-shaped fields on both arms, so the
    // two cases are built and encoded separately rather than threading an
    // `Option` through a single generic struct.
    if key.other_primes.is_empty() {
        #[derive(Message)]
        struct Wire {
            version: u8,
            n: Integer,
            e: Integer,
            d: Integer,
            p: Integer,
            q: Integer,
            dp: Integer,
            dq: Integer,
            qinv: Integer,
        }

        Wire {
            version,
            n: key.n.clone(),
            e: key.e.clone(),
            d: key.d.clone(),
            p: key.p.clone(),
            q: key.q.clone(),
            dp: key.dp.clone(),
            dq: key.dq.clone(),
            qinv: key.qinv.clone(),
        }
        .to_vec()
    } else {
        #[derive(Message)]
        struct Wire {
            version: u8,
            n: Integer,
            e: Integer,
            d: Integer,
            p: Integer,
            q: Integer,
            dp: Integer,
            dq: Integer,
            qinv: Integer,
            other_prime_infos: OtherPrimeInfos,
        }

        Wire {
            version,
            n: key.n.clone(),
            e: key.e.clone(),
            d: key.d.clone(),
            p: key.p.clone(),
            q: key.q.clone(),
            dp: key.dp.clone(),
            dq: key.dq.clone(),
            qinv: key.qinv.clone(),
            other_prime_infos: OtherPrimeInfos(key.other_primes.clone()),
        }
        .to_vec()
    }
}

fn decode_private(bytes: &[u8]) -> Result<Private> {
    #[derive(Message)]
    struct Wire {
        version: u8,
        n: Integer,
        e: Integer,
        d: Integer,
        p: Integer,
        q: Integer,
        dp: Integer,
        dq: Integer,
        qinv: Integer,
        other_prime_infos: Option<OtherPrimeInfos>,
    }

    let raw = Wire::from_der(bytes).map_err(Error::from)?;
    let other_primes = raw.other_prime_infos.unwrap_or_default().0;

    let version_ok = match raw.version {
        0 => other_primes.is_empty(),
        1 => !other_primes.is_empty(),
        _ => false,
    };

    if !version_ok {
        return Err(Error::RsaVersionInconsistent);
    }

    Ok(Private {
        n: raw.n,
        e: raw.e,
        d: raw.d,
        p: raw.p,
        q: raw.q,
        dp: raw.dp,
        dq: raw.dq,
        qinv: raw.qinv,
        other_primes,
    })
}

/// The `rsaEncryption` algorithm OID, for callers assembling their own
/// `AlgorithmIdentifier`.
pub fn algorithm_oid() -> ObjectIdentifier {
    rsa_encryption()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn public_2048() -> Public {
        let n = (BigUint::from(1u8) << 2048u32) - BigUint::from(1u8);
        Public {
            n: Integer::new(n),
            e: Integer::from_u64(65537),
        }
    }

    #[test]
    fn public_key_round_trips() {
        let pk = public_2048();
        let encoded = pk.encode();
        assert_eq!(Public::decode(&encoded).unwrap(), pk);
    }

    #[test]
    fn public_key_2048_byte_shape() {
        // n = 2^2048 - 1: 256 bytes of 0xff, plus a leading zero so the
        // INTEGER's high bit doesn't read as negative.
        let encoded = public_2048().encode();
        assert_eq!(encoded[0], 0x30); // SEQUENCE
        // modulus INTEGER: tag, then a 2-byte length (257 > 127), then
        // 257 content bytes.
        assert_eq!(encoded[2], 0x02);
        assert_eq!(encoded[3], 0x82);
        assert_eq!(u16::from_be_bytes([encoded[4], encoded[5]]), 257);
        assert_eq!(encoded[6], 0x00);
        assert!(encoded[7..7 + 256].iter().all(|&b| b == 0xff));
        // publicExponent INTEGER: `02 03 01 00 01`.
        let e_start = 7 + 256;
        assert_eq!(&encoded[e_start..e_start + 5], &[0x02, 0x03, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn trailing_byte_is_rejected() {
        let mut encoded = public_2048().encode();
        encoded.push(0);
        let err = Public::decode(&encoded).unwrap_err();
        assert!(err.to_string().contains("non empty leftover"));
    }

    #[test]
    fn truncated_encoding_is_rejected() {
        let encoded = public_2048().encode();
        assert!(Public::decode(&encoded[..encoded.len() - 1]).is_err());
    }

    fn two_prime_private() -> Private {
        Private {
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
    fn two_prime_private_key_round_trips_as_version_zero() {
        let sk = two_prime_private();
        let encoded = sk.encode();
        assert_eq!(encoded[4], 0); // version INTEGER content byte
        assert_eq!(Private::decode(&encoded).unwrap(), sk);
    }

    #[test]
    fn multi_prime_private_key_round_trips_as_version_one() {
        let mut sk = two_prime_private();
        sk.other_primes.push(OtherPrimeInfo {
            r: Integer::from_u64(7),
            d: Integer::from_u64(3),
            t: Integer::from_u64(5),
        });

        let encoded = sk.encode();
        assert_eq!(encoded[4], 1);
        assert_eq!(Private::decode(&encoded).unwrap(), sk);
    }

    #[test]
    fn version_zero_with_other_primes_is_rejected() {
        let mut sk = two_prime_private();
        sk.other_primes.push(OtherPrimeInfo {
            r: Integer::from_u64(7),
            d: Integer::from_u64(3),
            t: Integer::from_u64(5),
        });
        let mut encoded = sk.encode();
        encoded[4] = 0; // lie about the version
        assert_eq!(
            Private::decode(&encoded).unwrap_err(),
            Error::RsaVersionInconsistent
        );
    }

    #[test]
    fn version_one_without_other_primes_is_rejected() {
        let sk = two_prime_private();
        let mut encoded = sk.encode();
        encoded[4] = 1; // lie about the version
        assert_eq!(
            Private::decode(&encoded).unwrap_err(),
            Error::RsaVersionInconsistent
        );
    }
}
