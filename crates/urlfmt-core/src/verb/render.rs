//! Renders args the way each verb prints them.

use super::Verb;
use crate::args::Arg;

/// Returns `None` when the verb cannot format this kind of arg.
pub(crate) fn render(verb: Verb, arg: &Arg) -> Option<String> {
    let out = match (verb, arg) {
        (Verb::String, Arg::Str(s)) => s.clone(),
        (Verb::String, Arg::Char(c)) => c.to_string(),
        (Verb::Bool, Arg::Bool(b)) => b.to_string(),
        (Verb::Base2, Arg::Int(n)) => signed(*n, "", |u| format!("{:b}", u)),
        (Verb::Base8, Arg::Int(n)) => signed(*n, "", |u| format!("{:o}", u)),
        (Verb::Base8Prefix, Arg::Int(n)) => signed(*n, "0o", |u| format!("{:o}", u)),
        (Verb::Base10, Arg::Int(n)) => n.to_string(),
        (Verb::Base10, Arg::Char(c)) => u32::from(*c).to_string(),
        (Verb::Char, Arg::Char(c)) => c.to_string(),
        (Verb::Char, Arg::Int(n)) => u32::try_from(*n)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
        (Verb::Unicode, Arg::Int(n)) => format!("U+{:04X}", n),
        (Verb::Unicode, Arg::Char(c)) => format!("U+{:04X}", u32::from(*c)),
        (Verb::SciLower, Arg::Float(x)) => scientific(*x, false),
        (Verb::SciUpper, Arg::Float(x)) => scientific(*x, true),
        (Verb::Float | Verb::FloatSynonym, Arg::Float(x)) => special(*x).unwrap_or_else(|| format!("{:.6}", x)),
        (Verb::HexLower, Arg::Float(x)) => hex_float(*x, false),
        (Verb::HexUpper, Arg::Float(x)) => hex_float(*x, true),
        (Verb::HexLower, Arg::Int(n)) => signed(*n, "", |u| format!("{:x}", u)),
        (Verb::HexUpper, Arg::Int(n)) => signed(*n, "", |u| format!("{:X}", u)),
        (Verb::HexLower, Arg::Str(s)) => s.bytes().map(|b| format!("{:02x}", b)).collect(),
        (Verb::HexUpper, Arg::Str(s)) => s.bytes().map(|b| format!("{:02X}", b)).collect(),
        _ => return None,
    };
    Some(out)
}

/// Formats the magnitude with `digits` and puts the sign before `prefix`.
fn signed(n: i64, prefix: &str, digits: impl Fn(u64) -> String) -> String {
    let sign = if n < 0 { "-" } else { "" };
    format!("{}{}{}", sign, prefix, digits(n.unsigned_abs()))
}

fn special(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("NaN".to_string())
    } else if x.is_infinite() {
        Some(if x > 0.0 { "+Inf" } else { "-Inf" }.to_string())
    } else {
        None
    }
}

/// `-1.234456e+78`: six mantissa digits, signed exponent of at least two digits.
fn scientific(x: f64, upper: bool) -> String {
    if let Some(s) = special(x) {
        return s;
    }
    let raw = format!("{:.6e}", x);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((&raw, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:02}", mantissa, marker, sign, exp.unsigned_abs())
}

/// Shortest hexadecimal float, e.g. `0x1.8p+01`.
fn hex_float(x: f64, upper: bool) -> String {
    if let Some(s) = special(x) {
        return s;
    }
    let sign = if x.is_sign_negative() { "-" } else { "" };
    let x = x.abs();
    let out = if x == 0.0 {
        format!("{}0x0p+00", sign)
    } else {
        const FRAC_BITS: u32 = 52;
        const FRAC_MASK: u64 = (1 << FRAC_BITS) - 1;
        let bits = x.to_bits();
        let mut biased = ((bits >> FRAC_BITS) & 0x7ff) as i32;
        let mut frac = bits & FRAC_MASK;
        if biased == 0 {
            // Subnormal: shift the leading one up to the implicit bit.
            let shift = frac.leading_zeros() - (63 - FRAC_BITS);
            frac = (frac << shift) & FRAC_MASK;
            biased = 1 - shift as i32;
        }
        let exp = biased - 1023;
        let digits = format!("{:013x}", frac);
        let digits = digits.trim_end_matches('0');
        let dot = if digits.is_empty() { "" } else { "." };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}0x1{}{}p{}{:02}",
            sign,
            dot,
            digits,
            exp_sign,
            exp.unsigned_abs()
        )
    };
    if upper {
        out.to_uppercase()
    } else {
        out
    }
}
