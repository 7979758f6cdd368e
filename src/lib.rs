//! Immutable currency value objects and a process-wide registry that
//! resolves them by alphabetic code, numeric code, or issuing country.
//!
//! The registry is built lazily from the bundled ISO 4217 dataset on first
//! use and hands out shared instances: every lookup of the same currency,
//! through any index, returns the identical allocation.
//!
//! ```rust
//! use currency_core::Currency;
//!
//! let euro = Currency::of("EUR")?;
//! assert_eq!(euro.name(), "Euro");
//! assert_eq!(euro.fraction_digits(), &2);
//! assert!(euro.is(978));
//! # Ok::<(), currency_core::Error>(())
//! ```

pub mod error;
mod iso4217;
mod models;
mod registry;

pub use error::{Error, Result, Unresolved};
pub use iso4217::CurrencyEntry;
pub use models::currency::{Currency, CurrencyIdentity};
pub use registry::{CurrencyRegistry, Identifier};
