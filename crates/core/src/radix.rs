//! Validated numeral base
//!
//! Digits are drawn from the alphabet `0-9A-Z`, read case-insensitively
//! and always written upper-case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A base in the range `2..=36`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Radix(u32);

impl Radix {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 36;

    pub const BINARY: Radix = Radix(2);
    pub const DECIMAL: Radix = Radix(10);
    pub const HEX: Radix = Radix(16);

    pub fn new(base: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&base) {
            Ok(Radix(base))
        } else {
            Err(Error::InvalidBase(base.to_string()))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Value of `c` in this base, if it is a valid digit here
    pub fn digit_value(self, c: char) -> Option<u32> {
        c.to_digit(36).filter(|&d| d < self.0)
    }

    /// Upper-case symbol for `digit`
    ///
    /// Callers guarantee `digit < self.get()`.
    pub fn digit_char(self, digit: u32) -> char {
        debug_assert!(digit < self.0, "digit {} out of range for base {}", digit, self.0);
        char::from_digit(digit, self.0)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

impl FromStr for Radix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let base: u32 = trimmed
            .parse()
            .map_err(|_| Error::InvalidBase(trimmed.to_string()))?;
        Radix::new(base)
    }
}

impl TryFrom<u32> for Radix {
    type Error = Error;

    fn try_from(base: u32) -> Result<Self> {
        Radix::new(base)
    }
}

impl From<Radix> for u32 {
    fn from(radix: Radix) -> u32 {
        radix.0
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
