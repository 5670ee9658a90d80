//! Literal parsing
//!
//! Grammar: `[+-] digits [. digits [( digits )]]`, where either digit run
//! around the separator may be empty but not both. A parenthesised group
//! repeats forever, so `0.1(6)` in base 10 is exactly one sixth.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::numeral::Numeral;
use crate::radix::Radix;

/// Fractional separator
pub const SEPARATOR: char = '.';

/// The pieces of a literal between sign and end
#[derive(Debug, PartialEq, Eq)]
struct Parts<'a> {
    integer: &'a str,
    fraction: &'a str,
    period: Option<&'a str>,
}

/// Parse `literal` as a number written in `radix`
pub fn parse(literal: &str, radix: Radix) -> Result<Numeral> {
    let text = literal.trim();
    let (negative, body) = match text.chars().next() {
        Some('-') => (true, &text[1..]),
        Some('+') => (false, &text[1..]),
        _ => (false, text),
    };

    let parts = split(text, body)?;

    let integer = accumulate(parts.integer, radix)?;
    let mut value = BigRational::from_integer(integer);

    // Scale of the fractional digits: base^k
    let base = BigInt::from(radix.get());
    let scale = base.pow(parts.fraction.len() as u32);

    if !parts.fraction.is_empty() {
        let fraction = accumulate(parts.fraction, radix)?;
        value += BigRational::new(fraction, scale.clone());
    }

    if let Some(period) = parts.period {
        let repeat = accumulate(period, radix)?;
        let cycle = base.pow(period.len() as u32) - BigInt::one();
        value += BigRational::new(repeat, cycle * scale);
    }

    Ok(Numeral::from_ratio(if negative { -value } else { value }))
}

/// Value of a digit run
///
/// Every digit is checked first so the error names the offending one; the
/// conversion itself then packs many digits per machine word.
fn accumulate(digits: &str, radix: Radix) -> Result<BigInt> {
    if let Some(c) = digits.chars().find(|&c| radix.digit_value(c).is_none()) {
        return Err(Error::InvalidDigit {
            digit: c,
            base: radix.get(),
        });
    }
    if digits.is_empty() {
        return Ok(BigInt::zero());
    }
    // all bytes are ASCII digits of this base, so this always succeeds
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix.get()).unwrap_or_default();
    Ok(BigInt::from(magnitude))
}

fn split<'a>(literal: &str, body: &'a str) -> Result<Parts<'a>> {
    let (integer, rest) = match body.split_once(SEPARATOR) {
        Some((integer, rest)) => (integer, Some(rest)),
        None => (body, None),
    };

    if integer.contains(['(', ')']) {
        return Err(Error::malformed(literal, "repeating group in integer part"));
    }

    let Some(rest) = rest else {
        if integer.is_empty() {
            return Err(Error::malformed(literal, "empty mantissa"));
        }
        return Ok(Parts {
            integer,
            fraction: "",
            period: None,
        });
    };

    if rest.contains(SEPARATOR) {
        return Err(Error::malformed(literal, "more than one fractional separator"));
    }

    let (fraction, period) = match rest.split_once('(') {
        None => {
            if rest.contains(')') {
                return Err(Error::malformed(literal, "unbalanced parenthesis"));
            }
            (rest, None)
        }
        Some((fraction, tail)) => {
            if fraction.contains(')') {
                return Err(Error::malformed(literal, "unbalanced parenthesis"));
            }
            let Some((period, after)) = tail.split_once(')') else {
                return Err(Error::malformed(literal, "unclosed repeating group"));
            };
            if period.contains('(') {
                return Err(Error::malformed(literal, "nested repeating group"));
            }
            if period.is_empty() {
                return Err(Error::malformed(literal, "empty repeating group"));
            }
            if !after.is_empty() {
                return Err(Error::malformed(
                    literal,
                    "characters after repeating group",
                ));
            }
            (fraction, Some(period))
        }
    };

    if integer.is_empty() && fraction.is_empty() && period.is_none() {
        return Err(Error::malformed(literal, "empty mantissa"));
    }

    Ok(Parts {
        integer,
        fraction,
        period,
    })
}
