//! Wire protocol
//!
//! Requests are comma-separated text:
//!
//! - `convert,<literal>,<source base>,<target base>`
//! - `arif,<operand a>,<operand b>,<base>,<operator>`
//!
//! The response is the bare result, or a message starting with `Error: `.

use std::fmt;

use numera_core::{compute, convert, FormatOptions, Operator, Radix};

/// Discriminator of a conversion request
pub const CONVERT: &str = "convert";

/// Discriminator of an arithmetic request
pub const ARITHMETIC: &str = "arif";

/// Separator between request fields
pub const FIELD_SEPARATOR: char = ',';

/// Prefix on every failure response
pub const FAILURE_PREFIX: &str = "Error: ";

/// Why a request could not be answered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("unknown command '{0}': expected 'convert' or 'arif'")]
    UnknownCommand(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Numeral(#[from] numera_core::Error),
}

/// Convert `literal` from `source` to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub literal: String,
    pub source: Radix,
    pub target: Radix,
}

/// Combine two operands written in `radix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticRequest {
    pub lhs: String,
    pub rhs: String,
    pub radix: Radix,
    pub op: Operator,
}

/// A decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Convert(ConvertRequest),
    Arithmetic(ArithmeticRequest),
}

impl Request {
    /// Decode and validate a request payload
    pub fn decode(payload: &str) -> Result<Self, RequestError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(RequestError::MalformedRequest("empty request".into()));
        }

        let fields: Vec<&str> = payload.split(FIELD_SEPARATOR).map(str::trim).collect();

        match fields[0] {
            CONVERT => {
                let [_, literal, source, target] = expect_fields::<4>(CONVERT, &fields)?;
                Ok(Request::Convert(ConvertRequest {
                    literal: literal.to_string(),
                    source: source.parse()?,
                    target: target.parse()?,
                }))
            }
            ARITHMETIC => {
                let [_, lhs, rhs, radix, op] = expect_fields::<5>(ARITHMETIC, &fields)?;
                Ok(Request::Arithmetic(ArithmeticRequest {
                    lhs: lhs.to_string(),
                    rhs: rhs.to_string(),
                    radix: radix.parse()?,
                    op: op.parse()?,
                }))
            }
            other => Err(RequestError::UnknownCommand(other.to_string())),
        }
    }

    /// Encode as a wire payload
    pub fn encode(&self) -> String {
        match self {
            Request::Convert(r) => {
                format!("{CONVERT},{},{},{}", r.literal, r.source, r.target)
            }
            Request::Arithmetic(r) => {
                format!("{ARITHMETIC},{},{},{},{}", r.lhs, r.rhs, r.radix, r.op)
            }
        }
    }

    /// Discriminator of this request
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Convert(_) => CONVERT,
            Request::Arithmetic(_) => ARITHMETIC,
        }
    }

    /// Run the request through the numeral engine
    pub fn execute(&self, options: &FormatOptions) -> numera_core::Result<String> {
        match self {
            Request::Convert(r) => convert(&r.literal, r.source, r.target, options),
            Request::Arithmetic(r) => compute(&r.lhs, &r.rhs, r.radix, r.op, options),
        }
    }
}

fn expect_fields<'a, const N: usize>(
    command: &str,
    fields: &[&'a str],
) -> Result<[&'a str; N], RequestError> {
    <[&'a str; N]>::try_from(fields).map_err(|_| {
        RequestError::MalformedRequest(format!(
            "'{}' takes {} fields, got {}",
            command,
            N,
            fields.len()
        ))
    })
}

/// The single reply to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(String),
    Failure(String),
}

impl Response {
    /// Failure carrying the display text of `error`
    pub fn failure(error: &impl fmt::Display) -> Self {
        Response::Failure(format!("{FAILURE_PREFIX}{error}"))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Payload as sent on the wire
    pub fn text(&self) -> &str {
        match self {
            Response::Success(text) | Response::Failure(text) => text,
        }
    }

    pub fn into_wire(self) -> String {
        match self {
            Response::Success(text) | Response::Failure(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numera_core::Error as NumeralError;

    #[test]
    fn test_decode_convert() {
        let request = Request::decode("convert,FF,16,10").unwrap();
        assert_eq!(
            request,
            Request::Convert(ConvertRequest {
                literal: "FF".into(),
                source: Radix::HEX,
                target: Radix::DECIMAL,
            })
        );
        assert_eq!(request.kind(), CONVERT);
    }

    #[test]
    fn test_decode_arithmetic() {
        let request = Request::decode(" arif, A , 5 ,16,+\n").unwrap();
        assert_eq!(
            request,
            Request::Arithmetic(ArithmeticRequest {
                lhs: "A".into(),
                rhs: "5".into(),
                radix: Radix::HEX,
                op: Operator::Add,
            })
        );
    }

    #[test]
    fn test_field_count_mismatch() {
        for payload in ["convert,FF,16", "convert,FF,16,10,2", "arif,1,2,10", "arif"] {
            assert!(
                matches!(
                    Request::decode(payload),
                    Err(RequestError::MalformedRequest(_))
                ),
                "{}",
                payload
            );
        }
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Request::decode("power,2,3,10"),
            Err(RequestError::UnknownCommand("power".into()))
        );
        assert_eq!(
            Request::decode("   "),
            Err(RequestError::MalformedRequest("empty request".into()))
        );
    }

    #[test]
    fn test_invalid_fields() {
        assert_eq!(
            Request::decode("convert,FF,hex,10"),
            Err(RequestError::Numeral(NumeralError::InvalidBase("hex".into())))
        );
        assert_eq!(
            Request::decode("convert,FF,16,37"),
            Err(RequestError::Numeral(NumeralError::InvalidBase("37".into())))
        );
        assert_eq!(
            Request::decode("arif,1,2,10,%"),
            Err(RequestError::Numeral(NumeralError::UnsupportedOperator(
                "%".into()
            )))
        );
    }

    #[test]
    fn test_encode() {
        let payloads = ["convert,1.5,10,2", "arif,A,5,16,+", "arif,-1,-2,10,-"];
        for payload in payloads {
            assert_eq!(Request::decode(payload).unwrap().encode(), payload);
        }
    }

    #[test]
    fn test_failure_text() {
        let response = Response::failure(&NumeralError::DivisionByZero);
        assert_eq!(response.text(), "Error: division by zero");
        assert!(!response.is_success());
        assert_eq!(response.into_wire(), "Error: division by zero");
    }
}
