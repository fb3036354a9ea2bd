//! Bare DSA keys and their shared domain parameters.
//!
//! ```text
//! Dss-Parms ::= SEQUENCE {
//!     p   INTEGER,
//!     q   INTEGER,
//!     g   INTEGER
//! }
//!
//! DSAPublicKey  ::= INTEGER  -- y
//! DSAPrivateKey ::= INTEGER  -- x
//! ```
//!
//! Unlike RSA's `AlgorithmIdentifier`, DSA's `parameters` slot is never
//! `NULL`: it always carries the `Dss-Parms` SEQUENCE above, which is why
//! [`Params`] (not a unit struct) lives in the `parameters` field of the
//! X.509/PKCS#8 wrappers for this algorithm.

use der::{
    asn1::{Any, ObjectIdentifier},
    Decodable, Encodable, Message,
};

use crate::asn1util::require_no_trailing;
use crate::bigint::Integer;
use crate::error::{Error, Result};
use crate::oid::id_dsa;

const CONTEXT_PARAMS: &str = "DSA parameters";
const CONTEXT_PUBLIC: &str = "DSA public key";
const CONTEXT_PRIVATE: &str = "DSA private key";

/// `Dss-Parms`: the domain parameters shared by a DSA keypair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Params {
    /// Prime modulus.
    pub p: Integer,
    /// Subgroup order.
    pub q: Integer,
    /// Generator.
    pub g: Integer,
}

#[derive(Clone, Message)]
struct RawParams {
    p: Integer,
    q: Integer,
    g: Integer,
}

impl Params {
    /// DER-encode as a `Dss-Parms` SEQUENCE.
    pub fn encode(&self) -> Vec<u8> {
        RawParams {
            p: self.p.clone(),
            q: self.q.clone(),
            g: self.g.clone(),
        }
        .to_vec()
        .expect("DSA parameters always encode")
    }

    /// BER-decode a `Dss-Parms` SEQUENCE.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PARAMS)?;
        let raw = RawParams::from_der(bytes).map_err(Error::from)?;
        Ok(Params {
            p: raw.p,
            q: raw.q,
            g: raw.g,
        })
    }

    /// Decode from an already-parsed `ANY`, as found in the `parameters`
    /// slot of an `AlgorithmIdentifier`. Used by
    /// [`crate::algorithm::expect_dsa`].
    pub(crate) fn from_any(any: &Any<'_>) -> Result<Self> {
        let raw: RawParams = any.sequence(|decoder| decoder.decode()).map_err(Error::from)?;
        Ok(Params {
            p: raw.p,
            q: raw.q,
            g: raw.g,
        })
    }
}

/// A bare DSA public key value, `y`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Public(pub Integer);

impl Public {
    /// DER-encode as a bare `INTEGER`.
    pub fn encode(&self) -> Vec<u8> {
        self.0.to_vec().expect("DSA public key always encodes")
    }

    /// BER-decode a bare `INTEGER`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PUBLIC)?;
        let value = Integer::from_der(bytes).map_err(Error::from)?;
        Ok(Public(value))
    }
}

/// A bare DSA private key value, `x`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Private(pub Integer);

impl Private {
    /// DER-encode as a bare `INTEGER`.
    pub fn encode(&self) -> Vec<u8> {
        self.0.to_vec().expect("DSA private key always encodes")
    }

    /// BER-decode a bare `INTEGER`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        require_no_trailing(bytes, CONTEXT_PRIVATE)?;
        let value = Integer::from_der(bytes).map_err(Error::from)?;
        Ok(Private(value))
    }
}

/// The `id-dsa` algorithm OID, for callers assembling their own
/// `AlgorithmIdentifier`.
pub fn algorithm_oid() -> ObjectIdentifier {
    id_dsa()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_42_encodes_as_single_byte_integer() {
        let pk = Public(Integer::from_u64(42));
        assert_eq!(pk.encode(), [0x02, 0x01, 0x2a]);
        assert_eq!(Public::decode(&pk.encode()).unwrap(), pk);
    }

    #[test]
    fn params_round_trip() {
        let params = Params {
            p: Integer::from_u64(23),
            q: Integer::from_u64(11),
            g: Integer::from_u64(4),
        };
        assert_eq!(Params::decode(&params.encode()).unwrap(), params);
    }

    #[test]
    fn private_key_trailing_byte_is_rejected() {
        let sk = Private(Integer::from_u64(7));
        let mut encoded = sk.encode();
        encoded.push(0xff);
        let err = Private::decode(&encoded).unwrap_err();
        assert!(err.to_string().contains("non empty leftover"));
    }
}
