//! Parsers from captured text back to typed args, keyed by pattern text.

use super::*;
use crate::error::ParseError;

/// Converts a captured substring into a typed value.
pub type Parser = fn(&str) -> Result<Arg, ParseError>;

/// Looks up the parser registered for a capture group's literal pattern
/// text. `None` means the capture is kept as a raw string.
pub fn parser_for(pattern: &str) -> Option<Parser> {
    let parser: Parser = match pattern {
        BOOL_PATTERN => |s| Ok(Arg::Bool(s.parse()?)),
        BASE2_PATTERN => |s| Ok(Arg::Int(i64::from_str_radix(s, 2)?)),
        CHAR_PATTERN => |s| s.chars().next().map(Arg::Char).ok_or(ParseError::Empty),
        BASE8_PATTERN => |s| Ok(Arg::Int(i64::from_str_radix(s, 8)?)),
        BASE8_PREFIX_PATTERN => |s| {
            let digits = s.strip_prefix("0o").unwrap_or(s);
            Ok(Arg::Int(i64::from_str_radix(digits, 8)?))
        },
        BASE10_PATTERN => |s| Ok(Arg::Int(s.parse()?)),
        UNICODE_PATTERN => |_| Ok(Arg::Nil),
        SCI_LOWER_PATTERN | SCI_UPPER_PATTERN | FLOAT_PATTERN => |s| Ok(Arg::Float(s.parse()?)),
        HEX_LOWER_PATTERN | HEX_UPPER_PATTERN => |s| Ok(Arg::Float(parse_hex_float(s)?)),
        _ => return None,
    };
    Some(parser)
}

fn hex_digit(c: char) -> Result<f64, ParseError> {
    c.to_digit(16).map(f64::from).ok_or(ParseError::HexFloat)
}

/// Parses a hexadecimal float such as `-0x1.8p+01` or `0X1.8P+01`.
pub fn parse_hex_float(s: &str) -> Result<f64, ParseError> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let rest = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .ok_or(ParseError::HexFloat)?;
    let (mantissa, exponent) = rest
        .split_once(|c| c == 'p' || c == 'P')
        .ok_or(ParseError::HexFloat)?;
    let exponent: i32 = exponent.parse()?;
    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(ParseError::HexFloat);
    }

    let mut value = 0f64;
    for c in whole.chars() {
        value = value * 16.0 + hex_digit(c)?;
    }
    let mut scale = 1.0 / 16.0;
    for c in frac.chars() {
        value += hex_digit(c)? * scale;
        scale /= 16.0;
    }
    let value = value * 2f64.powi(exponent);
    Ok(if negative { -value } else { value })
}
