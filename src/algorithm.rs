//! The `AlgorithmIdentifier` wrapper shared by the RSA, DSA, and EC
//! grammars.
//!
//! ```text
//! AlgorithmIdentifier  ::=  SEQUENCE  {
//!      algorithm               OBJECT IDENTIFIER,
//!      parameters              ANY DEFINED BY algorithm OPTIONAL  }
//! ```
//!
//! Decoding only ever produces a [`RawAlgorithmIdentifier`]: the OID is
//! not checked against an expected family here. Each algorithm module
//! (`rsa`, `dsa`, `ec`) validates the pairing itself via the `expect_*`
//! helpers below, which is where the precise
//! `"Algorithm OID and parameters doesn't match"` error comes from.

use core::convert::TryFrom;
use der::{
    asn1::{Any, ObjectIdentifier},
    Message, Tag,
};

use crate::dsa;
use crate::ec;
use crate::error::{Error, Result};
use crate::oid::{id_dsa, id_ec_public_key, rsa_encryption};

/// Build a [`RawAlgorithmIdentifier`] from an OID and the complete DER
/// encoding of its parameters (a full tag-length-value, not just the
/// value octets), as produced by `Encodable::to_vec`.
pub(crate) fn build<'a>(
    oid: ObjectIdentifier,
    params_der: Option<&'a [u8]>,
) -> Result<RawAlgorithmIdentifier<'a>> {
    let parameters = params_der.map(Any::try_from).transpose()?;
    Ok(RawAlgorithmIdentifier {
        algorithm: oid,
        parameters,
    })
}

/// `AlgorithmIdentifier` as it appears on the wire, with `parameters`
/// left uninterpreted.
#[derive(Clone, Message)]
pub(crate) struct RawAlgorithmIdentifier<'a> {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<Any<'a>>,
}

/// Validate that `ident` names the RSA family and carries the mandatory
/// `NULL` parameters.
pub(crate) fn expect_rsa(ident: &RawAlgorithmIdentifier<'_>) -> Result<()> {
    let oid_ok = ident.algorithm == rsa_encryption();
    let params_ok = matches!(&ident.parameters, Some(any) if any.tag() == Tag::Null);

    if oid_ok && params_ok {
        Ok(())
    } else {
        Err(Error::AlgorithmMismatch)
    }
}

/// Validate that `ident` names the DSA family, and decode its
/// parameters into [`dsa::Params`].
pub(crate) fn expect_dsa(ident: &RawAlgorithmIdentifier<'_>) -> Result<dsa::Params> {
    if ident.algorithm != id_dsa() {
        return Err(Error::AlgorithmMismatch);
    }

    let any = ident.parameters.as_ref().ok_or(Error::AlgorithmMismatch)?;
    dsa::Params::from_any(any).map_err(|_| Error::AlgorithmMismatch)
}

/// Validate that `ident` names the EC family, and decode its parameters
/// into [`ec::Params`].
pub(crate) fn expect_ec(ident: &RawAlgorithmIdentifier<'_>) -> Result<ec::Params> {
    if ident.algorithm != id_ec_public_key() {
        return Err(Error::AlgorithmMismatch);
    }

    let any = ident.parameters.as_ref().ok_or(Error::AlgorithmMismatch)?;
    ec::Params::from_any(any).map_err(|_| Error::AlgorithmMismatch)
}
