//! The currency module holds the [`Currency`] value object, an immutable
//! record identifying one currency by its alphabetic and numeric codes.
//!
//! Instances are normally obtained from the registry ([`Currency::of`],
//! [`Currency::of_country`]) so that everyone resolving the same code shares
//! the same allocation. Constructing a `Currency` by hand is only needed when
//! feeding the registry a custom dataset.

use crate::{
    error::{Error, Result},
    registry::{CurrencyRegistry, Identifier},
};
use getset::Getters;
use std::convert::TryInto;
use std::fmt;
use std::sync::Arc;

/// The identities a [`Currency`] can be matched against via [`Currency::is`].
///
/// Matching is deliberately asymmetric: a `Currency` operand must agree on
/// both the alphabetic and the numeric code, while the scalar operands each
/// compare their single key only.
#[derive(Clone, Copy, Debug)]
pub enum CurrencyIdentity<'a> {
    /// Another currency. Both codes must match; name and fraction digits are
    /// not part of currency identity.
    Currency(&'a Currency),
    /// An alphabetic code.
    Code(&'a str),
    /// A numeric code.
    NumericCode(i64),
}

impl<'a> From<&'a Currency> for CurrencyIdentity<'a> {
    fn from(currency: &'a Currency) -> Self {
        Self::Currency(currency)
    }
}

impl<'a> From<&'a str> for CurrencyIdentity<'a> {
    fn from(code: &'a str) -> Self {
        Self::Code(code)
    }
}

impl<'a> From<&'a String> for CurrencyIdentity<'a> {
    fn from(code: &'a String) -> Self {
        Self::Code(code.as_str())
    }
}

impl<'a> From<u32> for CurrencyIdentity<'a> {
    fn from(numeric_code: u32) -> Self {
        Self::NumericCode(i64::from(numeric_code))
    }
}

impl<'a> From<i32> for CurrencyIdentity<'a> {
    fn from(numeric_code: i32) -> Self {
        Self::NumericCode(i64::from(numeric_code))
    }
}

impl<'a> From<i64> for CurrencyIdentity<'a> {
    fn from(numeric_code: i64) -> Self {
        Self::NumericCode(numeric_code)
    }
}

/// One currency as an immutable value: alphabetic code, numeric code,
/// display name, and the number of fraction digits its minor unit uses.
#[derive(Clone, Debug, PartialEq, Getters, derive_builder::Builder)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
#[builder(pattern = "owned", setter(into), build_fn(validate = "CurrencyBuilder::validate"))]
#[getset(get = "pub")]
pub struct Currency {
    /// The alphabetic code, probably some ISO 4217 value. Never empty.
    code: String,
    /// The numeric code paired with the alphabetic one.
    numeric_code: u32,
    /// The currency's display name. Carries no uniqueness constraint.
    name: String,
    /// How many decimal places this currency uses.
    fraction_digits: u32,
}

impl CurrencyBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref code) = self.code {
            if code.is_empty() {
                return Err("currency code cannot be empty".into());
            }
        }
        Ok(())
    }
}

impl Currency {
    pub fn builder() -> CurrencyBuilder {
        CurrencyBuilder::default()
    }

    /// Create a currency, validating its invariants: the code must be
    /// non-empty and the fraction digits non-negative. Fraction digits accept
    /// any integer type so that a negative count surfaces as
    /// [`Error::InvalidArgument`] instead of failing to represent.
    pub fn new<C, N, F>(code: C, numeric_code: u32, name: N, fraction_digits: F) -> Result<Self>
    where
        C: Into<String>,
        N: Into<String>,
        F: TryInto<u32>,
    {
        let fraction_digits = fraction_digits
            .try_into()
            .map_err(|_| Error::InvalidArgument("currency fraction digits must be non-negative".into()))?;
        Self::builder()
            .code(code.into())
            .numeric_code(numeric_code)
            .name(name.into())
            .fraction_digits(fraction_digits)
            .build()
            .map_err(Error::InvalidArgument)
    }

    /// Resolve a currency from the process-wide registry by alphabetic or
    /// numeric code. See [`CurrencyRegistry::currency`].
    pub fn of<'a, I>(identifier: I) -> Result<Arc<Currency>>
    where
        I: Into<Identifier<'a>>,
    {
        CurrencyRegistry::global()?.currency(identifier)
    }

    /// Resolve the single currency used by a country from the process-wide
    /// registry. See [`CurrencyRegistry::currency_for_country`].
    pub fn of_country(country_code: &str) -> Result<Arc<Currency>> {
        CurrencyRegistry::global()?.currency_for_country(country_code)
    }

    /// Test whether this currency matches the given identity.
    ///
    /// A [`Currency`] operand matches iff both the alphabetic and the numeric
    /// code agree. A code or numeric-code operand matches on that key alone,
    /// never requiring the other one.
    pub fn is<'a, I>(&self, other: I) -> bool
    where
        I: Into<CurrencyIdentity<'a>>,
    {
        match other.into() {
            CurrencyIdentity::Currency(other) => {
                self.code == other.code && self.numeric_code == other.numeric_code
            }
            CurrencyIdentity::Code(code) => self.code == code,
            CurrencyIdentity::NumericCode(numeric_code) => {
                i64::from(self.numeric_code) == numeric_code
            }
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Currency {
        Currency::new("USD", 840, "US Dollar", 2).unwrap()
    }

    #[test]
    fn fraction_digits_cannot_be_negative() {
        let res = Currency::new("USD", 840, "US Dollar", -1);
        assert_eq!(
            res,
            Err(Error::InvalidArgument("currency fraction digits must be non-negative".into()))
        );
        let currency = Currency::new("JPY", 392, "Yen", 0).unwrap();
        assert_eq!(currency.fraction_digits(), &0);
    }

    #[test]
    fn code_cannot_be_empty() {
        let res = Currency::new("", 840, "US Dollar", 2);
        assert_eq!(res, Err(Error::InvalidArgument("currency code cannot be empty".into())));
    }

    #[test]
    fn builder_builds_and_validates() {
        let currency = Currency::builder()
            .code("TND")
            .numeric_code(788u32)
            .name("Tunisian Dinar")
            .fraction_digits(3u32)
            .build()
            .unwrap();
        assert_eq!(currency.code(), "TND");
        assert_eq!(currency.numeric_code(), &788);
        assert_eq!(currency.name(), "Tunisian Dinar");
        assert_eq!(currency.fraction_digits(), &3);
        let res = Currency::builder()
            .code("")
            .numeric_code(0u32)
            .name("Nameless")
            .fraction_digits(2u32)
            .build();
        assert!(res.is_err());
    }

    #[test]
    fn matches_scalar_identities_independently() {
        let usd = usd();
        assert!(usd.is("USD"));
        assert!(usd.is(840));
        assert!(!usd.is("EUR"));
        assert!(!usd.is(978));
        assert!(!usd.is(-840));
    }

    #[test]
    fn matches_currencies_on_both_codes() {
        let usd = usd();
        assert!(usd.is(&usd.clone()));
        // a different name or scale is still the same currency
        let renamed = Currency::new("USD", 840, "Dollar, US", 4).unwrap();
        assert!(usd.is(&renamed));
        // either code disagreeing makes it a different currency
        let wrong_numeric = Currency::new("USD", 841, "US Dollar", 2).unwrap();
        assert!(!usd.is(&wrong_numeric));
        let wrong_code = Currency::new("USX", 840, "US Dollar", 2).unwrap();
        assert!(!usd.is(&wrong_code));
    }

    #[test]
    fn displays_as_code() {
        assert_eq!(format!("{}", usd()), "USD");
    }

    #[cfg(feature = "with_serde")]
    #[test]
    fn serializes_and_deserializes() {
        let usd = usd();
        let json = serde_json::to_string(&usd).unwrap();
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(usd, back);
    }
}
