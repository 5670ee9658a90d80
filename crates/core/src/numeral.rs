//! Exact numeric value shared by the parser, formatter and arithmetic

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// A parsed number held as a reduced rational
///
/// Nothing is rounded until the value is formatted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeral(BigRational);

impl Numeral {
    pub fn zero() -> Self {
        Numeral(BigRational::zero())
    }

    pub fn from_ratio(ratio: BigRational) -> Self {
        Numeral(ratio)
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Numeral(BigRational::from_integer(value.into()))
    }

    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn into_ratio(self) -> BigRational {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }
}

impl From<BigRational> for Numeral {
    fn from(ratio: BigRational) -> Self {
        Numeral(ratio)
    }
}

impl From<i64> for Numeral {
    fn from(value: i64) -> Self {
        Numeral::from_integer(value)
    }
}
