//! Error types for Numera Core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid base '{0}': expected an integer between 2 and 36")]
    InvalidBase(String),

    #[error("invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("malformed literal '{literal}': {reason}")]
    MalformedLiteral {
        literal: String,
        reason: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("unsupported operator '{0}': expected one of + - * /")]
    UnsupportedOperator(String),
}

impl Error {
    pub(crate) fn malformed(literal: &str, reason: &'static str) -> Self {
        Error::MalformedLiteral {
            literal: literal.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
