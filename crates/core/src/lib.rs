//! Numera Core Library
//!
//! Exact numeral engine: parsing literals in any base from 2 to 36,
//! formatting values back to text, base conversion and four-function
//! arithmetic. Values are held as reduced rationals so that rounding only
//! ever happens in the last formatting step.
//!
//! ```
//! use numera_core::{convert, FormatOptions, Radix};
//!
//! let out = convert("1.5", Radix::DECIMAL, Radix::BINARY, &FormatOptions::default()).unwrap();
//! assert_eq!(out, "1.1");
//! ```

pub mod arith;
pub mod convert;
pub mod error;
pub mod format;
pub mod numeral;
pub mod parse;
pub mod radix;

#[cfg(test)]
mod properties;

pub use arith::{apply, compute, Operator};
pub use convert::convert;
pub use error::{Error, Result};
pub use format::{format, normalize, FormatOptions, FractionStyle, DEFAULT_PRECISION};
pub use numeral::Numeral;
pub use parse::parse;
pub use radix::Radix;
