//! Arithmetic on base-N operands
//!
//! Operands are parsed to exact rationals, combined exactly and only
//! rounded by the final format step.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::format::{format, FormatOptions};
use crate::numeral::Numeral;
use crate::parse::parse;
use crate::radix::Radix;

/// Supported binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            other => Err(Error::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Apply `op` to two parsed values
pub fn apply(lhs: &Numeral, rhs: &Numeral, op: Operator) -> Result<Numeral> {
    let (a, b) = (lhs.as_ratio(), rhs.as_ratio());
    let result = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if rhs.is_zero() {
                return Err(Error::DivisionByZero);
            }
            a / b
        }
    };
    Ok(Numeral::from_ratio(result))
}

/// Parse `a` and `b` in `radix`, combine them and format the result in the
/// same base
pub fn compute(a: &str, b: &str, radix: Radix, op: Operator, options: &FormatOptions) -> Result<String> {
    let lhs = parse(a, radix)?;
    let rhs = parse(b, radix)?;
    let result = apply(&lhs, &rhs, op)?;
    Ok(format(&result, radix, options))
}
