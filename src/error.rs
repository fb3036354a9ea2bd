//! Error types.

use core::fmt;

/// Result type with [`key_formats`][`crate`]'s [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced while encoding or decoding key material.
///
/// Implements [`fmt::Display`] so callers can render a human-readable
/// message; this crate does not expose structured error codes.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed ASN.1: a tag, length, or primitive-encoding violation
    /// reported by the underlying `der` codec.
    Asn1(der::Error),

    /// An RSA private key's `version` field disagreed with whether
    /// `otherPrimeInfos` was present.
    RsaVersionInconsistent,

    /// An EC `Field`'s `fieldType` OID did not match the shape of its
    /// `parameters`.
    FieldTypeMismatch,

    /// A characteristic-two `Field`'s `basis` OID did not match the shape
    /// of its basis parameters.
    FieldBasisMismatch,

    /// An algorithm identifier's OID did not match the algorithm family
    /// its parameters were decoded against.
    AlgorithmMismatch,

    /// An EC `Params` CHOICE value was tagged as neither an OID, `NULL`,
    /// nor a `SpecifiedDomain` SEQUENCE.
    EcParamsMismatch,

    /// An EC `SpecifiedDomain`'s `version` field was not `1`.
    EcSpecifiedDomainVersion(u32),

    /// An EC private key's `version` field was not `1`.
    EcPrivateKeyVersion(u32),

    /// A PKCS#8 `PrivateKeyInfo`'s `version` field was not `0`.
    Pkcs8Version(u32),

    /// Trailing bytes remained after decoding the top-level structure
    /// named by `context` (e.g. `"RSA"`, `"X509"`).
    TrailingData {
        /// Name of the structure that was being decoded.
        context: &'static str,
    },

    /// None of the RSA, DSA, or EC grammars matched while decoding an
    /// [`crate::x509::SubjectPublicKeyInfo`] or
    /// [`crate::pkcs8::PrivateKeyInfo`].
    NoMatchingAlgorithm,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Asn1(err) => write!(f, "{}", err),
            Error::RsaVersionInconsistent => {
                f.write_str("RSA private key version inconsistent with key data")
            }
            Error::FieldTypeMismatch => f.write_str("field type and parameters doesn't match"),
            Error::FieldBasisMismatch => {
                f.write_str("field basis type and parameters doesn't match")
            }
            Error::AlgorithmMismatch => f.write_str("Algorithm OID and parameters doesn't match"),
            Error::EcParamsMismatch => f.write_str("EC parameters CHOICE arm doesn't match"),
            Error::EcSpecifiedDomainVersion(v) => {
                write!(f, "EC specified domain version {} not supported", v)
            }
            Error::EcPrivateKeyVersion(v) => {
                write!(f, "EC private key version {} not supported", v)
            }
            Error::Pkcs8Version(v) => write!(f, "PKCS8: version {} not supported", v),
            Error::TrailingData { context } => {
                write!(f, "{}: key with non empty leftover", context)
            }
            Error::NoMatchingAlgorithm => f.write_str("Couldn't parse key"),
        }
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
