//! Rendering numbers as base-N text

use std::collections::HashMap;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::numeral::Numeral;
use crate::parse::{parse, SEPARATOR};
use crate::radix::Radix;

/// Fractional digits emitted when nothing else is configured
pub const DEFAULT_PRECISION: u32 = 10;

/// How the fractional part is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionStyle {
    /// Cut after `precision` digits, truncating toward zero
    #[default]
    Truncated,
    /// Mark a repeating cycle with parentheses, e.g. `0.1(6)`
    Repeating,
}

/// Formatter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Maximum number of fractional digits
    pub precision: u32,
    pub style: FractionStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            style: FractionStyle::Truncated,
        }
    }
}

impl FormatOptions {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_style(mut self, style: FractionStyle) -> Self {
        self.style = style;
        self
    }
}

/// Render `value` in `radix`
///
/// Trailing fractional zeros are dropped, and the separator goes with them
/// when nothing is left. A value that shows no nonzero digit is written `0`
/// without a sign.
pub fn format(value: &Numeral, radix: Radix, options: &FormatOptions) -> String {
    let ratio = value.as_ratio();
    let numer = ratio.numer().magnitude();
    let denom = ratio.denom().magnitude();

    let (integer, remainder) = numer.div_rem(denom);
    let fraction = match options.style {
        FractionStyle::Truncated => truncated_digits(remainder, denom, radix, options.precision),
        FractionStyle::Repeating => repeating_digits(remainder, denom, radix, options.precision),
    };

    let mut out = String::new();
    if value.is_negative() && !(integer.is_zero() && fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&integer.to_str_radix(radix.get()).to_ascii_uppercase());
    if !fraction.is_empty() {
        out.push(SEPARATOR);
        out.push_str(&fraction);
    }
    out
}

/// Parse then re-format in the same base: strips leading zeros, trailing
/// fractional zeros and a redundant `+`
pub fn normalize(literal: &str, radix: Radix, options: &FormatOptions) -> Result<String> {
    Ok(format(&parse(literal, radix)?, radix, options))
}

/// Next digit of `remainder / denom`, leaving the new remainder in place
fn next_digit(remainder: &mut BigUint, denom: &BigUint, radix: Radix) -> char {
    *remainder *= radix.get();
    let (digit, rest) = remainder.div_rem(denom);
    *remainder = rest;
    // digit < base, so it fits in the lowest word
    radix.digit_char(digit.iter_u32_digits().next().unwrap_or(0))
}

fn truncated_digits(mut remainder: BigUint, denom: &BigUint, radix: Radix, precision: u32) -> String {
    let mut digits = String::new();
    for _ in 0..precision {
        if remainder.is_zero() {
            break;
        }
        digits.push(next_digit(&mut remainder, denom, radix));
    }
    trim_zeros(digits)
}

fn repeating_digits(mut remainder: BigUint, denom: &BigUint, radix: Radix, precision: u32) -> String {
    // remainder -> index of the digit it produced
    let mut seen: HashMap<BigUint, usize> = HashMap::new();
    let mut digits = String::new();

    loop {
        if remainder.is_zero() {
            return digits;
        }
        if let Some(&start) = seen.get(&remainder) {
            digits.insert(start, '(');
            digits.push(')');
            return digits;
        }
        if digits.len() >= precision as usize {
            return trim_zeros(digits);
        }
        seen.insert(remainder.clone(), digits.len());
        digits.push(next_digit(&mut remainder, denom, radix));
    }
}

fn trim_zeros(mut digits: String) -> String {
    let len = digits.trim_end_matches('0').len();
    digits.truncate(len);
    digits
}
