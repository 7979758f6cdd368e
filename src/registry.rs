//! The registry is the process-wide cache of known currencies. On first use
//! it scans the currency dataset once, builds one shared [`Currency`] per
//! entry, and indexes that single set of instances by alphabetic code, by
//! numeric code, and by issuing country. Every lookup afterwards answers from
//! those indices, so resolving the same currency twice hands back the same
//! allocation.

use crate::{
    error::{Error, Result, Unresolved},
    iso4217::{self, CurrencyEntry},
    models::currency::Currency,
};
use once_cell::sync::OnceCell;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;
use std::sync::Arc;

/// An identifier accepted by [`CurrencyRegistry::currency`]: either
/// alphabetic-code text or a numeric code. Numeric codes may also arrive
/// spelled as text ("978", "0978"); text consisting solely of ASCII digits is
/// resolved against the numeric index, everything else against the
/// alphabetic one.
#[derive(Clone, Copy, Debug)]
pub enum Identifier<'a> {
    /// An alphabetic code, or a numeric code spelled as digits.
    Text(&'a str),
    /// A numeric code.
    Numeric(i64),
}

impl<'a> From<&'a str> for Identifier<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Identifier<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<u32> for Identifier<'a> {
    fn from(numeric_code: u32) -> Self {
        Self::Numeric(i64::from(numeric_code))
    }
}

impl<'a> From<i32> for Identifier<'a> {
    fn from(numeric_code: i32) -> Self {
        Self::Numeric(i64::from(numeric_code))
    }
}

impl<'a> From<i64> for Identifier<'a> {
    fn from(numeric_code: i64) -> Self {
        Self::Numeric(numeric_code)
    }
}

static GLOBAL: OnceCell<CurrencyRegistry> = OnceCell::new();

/// The authoritative source for resolving currency identifiers to shared
/// [`Currency`] instances.
///
/// The process-wide registry over the bundled ISO 4217 dataset lives behind
/// [`CurrencyRegistry::global`]. Registries over custom datasets can be built
/// directly with [`CurrencyRegistry::from_entries`]; tests use that instead
/// of resetting global state.
#[derive(Debug)]
pub struct CurrencyRegistry {
    by_code: HashMap<String, Arc<Currency>>,
    by_numeric_code: HashMap<u32, Arc<Currency>>,
    by_country: HashMap<String, Arc<Currency>>,
    /// Countries the dataset associates with more than one currency. Kept so
    /// country lookups can report "ambiguous" rather than "absent".
    ambiguous_countries: HashSet<String>,
}

impl CurrencyRegistry {
    /// The process-wide registry over the bundled ISO 4217 dataset,
    /// constructed on first call. Under concurrent first use exactly one
    /// caller builds the indices while the others wait for the finished
    /// registry; a construction failure leaves the cell untouched.
    pub fn global() -> Result<&'static CurrencyRegistry> {
        GLOBAL.get_or_try_init(|| CurrencyRegistry::from_entries(iso4217::ISO_4217))
    }

    /// Build a registry from a dataset in one pass. Each entry becomes one
    /// shared [`Currency`], reachable from every index it appears in.
    ///
    /// A malformed dataset (invalid entry, duplicate alphabetic or numeric
    /// code) fails the whole construction; no partially populated registry
    /// ever escapes.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a CurrencyEntry>,
    {
        let mut by_code = HashMap::new();
        let mut by_numeric_code = HashMap::new();
        let mut by_country: HashMap<String, Arc<Currency>> = HashMap::new();
        let mut ambiguous_countries = HashSet::new();
        for entry in entries {
            let currency = Arc::new(Currency::new(
                entry.code,
                entry.numeric_code,
                entry.name,
                entry.fraction_digits,
            )?);
            if by_code.insert(entry.code.to_string(), currency.clone()).is_some() {
                return Err(Error::InvalidArgument(format!(
                    "duplicate currency code `{}` in dataset",
                    entry.code
                )));
            }
            if by_numeric_code.insert(entry.numeric_code, currency.clone()).is_some() {
                return Err(Error::InvalidArgument(format!(
                    "duplicate numeric currency code `{}` in dataset",
                    entry.numeric_code
                )));
            }
            for &country in entry.countries {
                if ambiguous_countries.contains(country) {
                    continue;
                }
                match by_country.entry(country.to_string()) {
                    Entry::Vacant(slot) => {
                        slot.insert(currency.clone());
                    }
                    Entry::Occupied(slot) => {
                        // A second distinct currency for this country: drop
                        // the binding instead of overwriting it. Last-write-
                        // wins would silently pick an arbitrary currency.
                        if !slot.get().is(currency.as_ref()) {
                            slot.remove();
                            ambiguous_countries.insert(country.to_string());
                        }
                    }
                }
            }
        }
        Ok(Self {
            by_code,
            by_numeric_code,
            by_country,
            ambiguous_countries,
        })
    }

    /// Resolve a currency by alphabetic or numeric code, returning the shared
    /// instance. Digit-only text is normalized by integer parsing, which
    /// strips the leading zeros the dataset never stores.
    pub fn currency<'a, I>(&self, identifier: I) -> Result<Arc<Currency>>
    where
        I: Into<Identifier<'a>>,
    {
        match identifier.into() {
            Identifier::Text(text) => {
                if let Some(numeric_code) = numeric_text(text) {
                    self.numeric_lookup(numeric_code)
                } else {
                    self.by_code
                        .get(text)
                        .cloned()
                        .ok_or_else(|| Error::UnknownCurrency(Unresolved::Code(text.to_string())))
                }
            }
            Identifier::Numeric(numeric_code) => self.numeric_lookup(numeric_code),
        }
    }

    fn numeric_lookup(&self, numeric_code: i64) -> Result<Arc<Currency>> {
        u32::try_from(numeric_code)
            .ok()
            .and_then(|key| self.by_numeric_code.get(&key))
            .cloned()
            .ok_or_else(|| Error::UnknownCurrency(Unresolved::NumericCode(numeric_code)))
    }

    /// Resolve the single currency a country uses. Fails when the country is
    /// absent from the dataset, and also when the dataset associates it with
    /// more than one currency; the two causes are distinguished in the error
    /// payload, and an ambiguous country is never resolved automatically.
    pub fn currency_for_country(&self, country_code: &str) -> Result<Arc<Currency>> {
        if let Some(currency) = self.by_country.get(country_code) {
            return Ok(currency.clone());
        }
        if self.ambiguous_countries.contains(country_code) {
            Err(Error::UnknownCurrency(Unresolved::AmbiguousCountry(country_code.to_string())))
        } else {
            Err(Error::UnknownCurrency(Unresolved::Country(country_code.to_string())))
        }
    }

    /// The full alphabetic-code index, for enumeration. The mapped instances
    /// are the same `Arc`s every lookup hands out.
    pub fn available_currencies(&self) -> &HashMap<String, Arc<Currency>> {
        &self.by_code
    }
}

fn numeric_text(text: &str) -> Option<i64> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}
