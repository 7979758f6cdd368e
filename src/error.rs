//! Error types for the currency core.

use std::fmt;
use thiserror::Error;

/// The identifier a failed registry lookup was asked to resolve.
///
/// Country lookups keep "the country is not in the dataset" and "the country
/// uses more than one currency" apart so callers can produce a precise
/// diagnostic, even though both surface as [`Error::UnknownCurrency`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unresolved {
    /// No currency carries this alphabetic code.
    Code(String),
    /// No currency carries this numeric code.
    NumericCode(i64),
    /// The country code is absent from the dataset.
    Country(String),
    /// The country is associated with more than one currency. The caller has
    /// to pick one out-of-band; the registry never picks for them.
    AmbiguousCountry(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "no currency with code `{}`", code),
            Self::NumericCode(numeric) => write!(f, "no currency with numeric code `{}`", numeric),
            Self::Country(country) => write!(f, "no currency registered for country `{}`", country),
            Self::AmbiguousCountry(country) => {
                write!(f, "country `{}` is associated with more than one currency", country)
            }
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A currency was constructed with a field that violates its invariants,
    /// or the registry was fed a malformed dataset.
    #[error("invalid currency data: {0}")]
    InvalidArgument(String),
    /// A registry lookup did not resolve to exactly one currency.
    #[error("unknown currency: {0}")]
    UnknownCurrency(Unresolved),
}

pub type Result<T> = std::result::Result<T, Error>;
