//! Shared low-level helpers used by every module's top-level `decode`
//! entry point, plus a couple of hand-rolled ASN.1 primitives the `der`
//! crate's derive machinery doesn't reach on its own.

use core::convert::TryInto;
use der::{
    asn1::Any, Decodable, Decoder, Encodable, Encoder, Header, Length, Tag, TagNumber, Tagged,
};

use crate::error::{Error, Result};

/// Confirm that `bytes` is exactly one top-level TLV (tag + length +
/// value), with nothing appended after it.
///
/// Called before handing `bytes` to the `der`-crate-driven structural
/// decoder, so that trailing data is reported with this crate's own
/// `"<context>: key with non empty leftover"` message rather than
/// whatever the underlying codec happens to say about it.
pub(crate) fn require_no_trailing(bytes: &[u8], context: &'static str) -> Result<()> {
    let mut decoder = Decoder::new(bytes);
    let header = Header::decode(&mut decoder).map_err(Error::from)?;

    let header_len: usize = header
        .encoded_len()
        .map_err(Error::from)?
        .try_into()
        .map_err(|_| Error::TrailingData { context })?;

    let body_len: usize = header
        .length
        .try_into()
        .map_err(|_| Error::TrailingData { context })?;

    let total = header_len
        .checked_add(body_len)
        .ok_or(Error::TrailingData { context })?;

    if total == bytes.len() {
        Ok(())
    } else {
        Err(Error::TrailingData { context })
    }
}

/// Decode an `ANY`'s content as a concrete, fully-owned type by
/// re-serializing it and handing the bytes to that type's own
/// `Decodable` impl.
///
/// Only sound for types that don't themselves borrow from the input
/// (e.g. [`crate::bigint::Integer`], `ObjectIdentifier`) since the
/// re-serialized buffer is a local temporary.
pub(crate) fn any_as<T>(any: &Any<'_>) -> der::Result<T>
where
    T: for<'b> Decodable<'b>,
{
    T::from_der(&any.to_vec()?)
}

/// Wraps an already fully-encoded ASN.1 value (a complete tag-length-value)
/// in an outer `[0] EXPLICIT` context tag.
pub(crate) struct ExplicitContext0<'a>(pub Any<'a>);

impl<'a> Tagged for ExplicitContext0<'a> {
    const TAG: Tag = Tag::ContextSpecific {
        constructed: true,
        number: TagNumber(0),
    };
}

impl<'a> Encodable for ExplicitContext0<'a> {
    fn encoded_len(&self) -> der::Result<Length> {
        let inner_len = self.0.encoded_len()?;
        Header::new(Self::TAG, inner_len)?.encoded_len()? + inner_len
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> der::Result<()> {
        Header::new(Self::TAG, self.0.encoded_len()?)?.encode(encoder)?;
        self.0.encode(encoder)
    }
}

/// Wraps an already fully-encoded ASN.1 value in an outer `[1] EXPLICIT`
/// context tag.
pub(crate) struct ExplicitContext1<'a>(pub Any<'a>);

impl<'a> Tagged for ExplicitContext1<'a> {
    const TAG: Tag = Tag::ContextSpecific {
        constructed: true,
        number: TagNumber(1),
    };
}

impl<'a> Encodable for ExplicitContext1<'a> {
    fn encoded_len(&self) -> der::Result<Length> {
        let inner_len = self.0.encoded_len()?;
        Header::new(Self::TAG, inner_len)?.encoded_len()? + inner_len
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> der::Result<()> {
        Header::new(Self::TAG, self.0.encoded_len()?)?.encode(encoder)?;
        self.0.encode(encoder)
    }
}
