//! Arbitrary-precision integers as they appear on the wire: ASN.1
//! `INTEGER`s that are always non-negative (moduli, exponents, curve
//! orders, ...).

use core::fmt;
use der::{asn1::UIntBytes, Decodable, Decoder, Encodable, Encoder, Length, Tag, Tagged};
use num_bigint::BigUint;

/// A non-negative arbitrary-precision integer, as decoded from or encoded
/// to an ASN.1 `INTEGER`.
///
/// No sign handling is performed beyond what the underlying big-integer
/// type does for us: every value this crate round-trips originates from
/// a modulus, exponent, coordinate, or similar quantity that is never
/// negative.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Integer(pub BigUint);

impl Integer {
    /// Wrap a [`BigUint`].
    pub fn new(value: BigUint) -> Self {
        Integer(value)
    }

    /// Convenience constructor from a `u64` (used heavily in tests).
    pub fn from_u64(value: u64) -> Self {
        Integer(BigUint::from(value))
    }

    /// Parse a decimal string, as exposed through the JSON diagnostic
    /// interface (see [`crate`] module docs).
    pub fn from_decimal(s: &str) -> Option<Self> {
        s.parse::<BigUint>().ok().map(Integer)
    }

    /// Render as a decimal string.
    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }

    fn der_bytes(&self) -> Vec<u8> {
        let bytes = self.0.to_bytes_be();
        if bytes.is_empty() {
            vec![0]
        } else {
            bytes
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BigUint> for Integer {
    fn from(value: BigUint) -> Self {
        Integer(value)
    }
}

impl From<Integer> for BigUint {
    fn from(value: Integer) -> Self {
        value.0
    }
}

impl Tagged for Integer {
    const TAG: Tag = Tag::Integer;
}

impl<'a> Decodable<'a> for Integer {
    fn decode(decoder: &mut Decoder<'a>) -> der::Result<Self> {
        let uint = UIntBytes::decode(decoder)?;
        Ok(Integer(BigUint::from_bytes_be(uint.as_bytes())))
    }
}

impl Encodable for Integer {
    fn encoded_len(&self) -> der::Result<Length> {
        UIntBytes::new(&self.der_bytes())?.encoded_len()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> der::Result<()> {
        UIntBytes::new(&self.der_bytes())?.encode(encoder)
    }
}
