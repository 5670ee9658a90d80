//! Base conversion

use crate::error::Result;
use crate::format::{format, FormatOptions};
use crate::parse::parse;
use crate::radix::Radix;

/// Re-express `literal`, written in `source`, in `target`
pub fn convert(literal: &str, source: Radix, target: Radix, options: &FormatOptions) -> Result<String> {
    let value = parse(literal, source)?;
    Ok(format(&value, target, options))
}
