//! Verb registry.
//!
//! A closed table of the printf-style verbs that can appear in a format URL,
//! the regex fragment that matches each verb's rendered output, and the
//! parser that turns a captured substring back into a typed [`Arg`].
//!
//! Verbs missing from the table (any other ASCII letter) fall back to a
//! synthesized `(\<letter>+)` fragment and extract as raw strings.

mod parse;
mod render;

pub use parse::{parse_hex_float, parser_for, Parser};
pub(crate) use render::render;

use crate::args::Arg;

/// The uninterpreted bytes of the string.
pub const STRING_PATTERN: &str = r"([a-zA-Z0-9-._~]+)";
/// The word true or false.
pub const BOOL_PATTERN: &str = r"(true|false)";
pub const BASE2_PATTERN: &str = r"([01]+)";
/// A single character.
pub const CHAR_PATTERN: &str = r"(.)";
pub const BASE8_PATTERN: &str = r"([0-7]+)";
/// Base 8 with a `0o` prefix.
pub const BASE8_PREFIX_PATTERN: &str = r"(0o[0-7]+)";
pub const BASE10_PATTERN: &str = r"(\d+)";
/// Unicode notation, e.g. `U+1234`. Extracts to [`Arg::Nil`].
pub const UNICODE_PATTERN: &str = r"(U\+[0-9]+)";
/// Scientific notation, e.g. `1.234456e+78` or `5.000000e-01`.
pub const SCI_LOWER_PATTERN: &str = r"([+-]?[0-9]+\.[0-9]+e[+-][0-9]+)";
/// Scientific notation, e.g. `1.234456E+78`.
pub const SCI_UPPER_PATTERN: &str = r"([+-]?[0-9]+\.[0-9]+E[+-][0-9]+)";
/// Decimal point but no exponent, e.g. `123.456`. Shared by `%f` and `%F`.
pub const FLOAT_PATTERN: &str = r"([+-]?[0-9]+\.[0-9]+)";
/// Hexadecimal float, e.g. `0x1.23abcp+20`. Powers of two have no
/// fraction (`0x1p-02`).
pub const HEX_LOWER_PATTERN: &str = r"([+-]?0x[0-9a-f]+(?:\.[0-9a-f]+)?p[+-][0-9]+)";
/// Upper-case hexadecimal float, e.g. `0X1.23ABCP+20`.
pub const HEX_UPPER_PATTERN: &str = r"([+-]?0X[0-9A-F]+(?:\.[0-9A-F]+)?P[+-][0-9]+)";

/// A single interpolation directive (`%s`, `%d`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `%s`
    String,
    /// `%t`
    Bool,
    /// `%b`
    Base2,
    /// `%c`
    Char,
    /// `%o`
    Base8,
    /// `%O`
    Base8Prefix,
    /// `%d`
    Base10,
    /// `%U`
    Unicode,
    /// `%e`
    SciLower,
    /// `%E`
    SciUpper,
    /// `%f`
    Float,
    /// `%F`
    FloatSynonym,
    /// `%x`
    HexLower,
    /// `%X`
    HexUpper,
    /// Any other ASCII letter; has no registered pattern.
    Other(char),
}

impl Verb {
    /// Maps a verb letter to its verb. Returns `None` for non-letters.
    pub fn from_char(c: char) -> Option<Verb> {
        let verb = match c {
            's' => Verb::String,
            't' => Verb::Bool,
            'b' => Verb::Base2,
            'c' => Verb::Char,
            'o' => Verb::Base8,
            'O' => Verb::Base8Prefix,
            'd' => Verb::Base10,
            'U' => Verb::Unicode,
            'e' => Verb::SciLower,
            'E' => Verb::SciUpper,
            'f' => Verb::Float,
            'F' => Verb::FloatSynonym,
            'x' => Verb::HexLower,
            'X' => Verb::HexUpper,
            c if c.is_ascii_alphabetic() => Verb::Other(c),
            _ => return None,
        };
        Some(verb)
    }

    pub fn letter(self) -> char {
        match self {
            Verb::String => 's',
            Verb::Bool => 't',
            Verb::Base2 => 'b',
            Verb::Char => 'c',
            Verb::Base8 => 'o',
            Verb::Base8Prefix => 'O',
            Verb::Base10 => 'd',
            Verb::Unicode => 'U',
            Verb::SciLower => 'e',
            Verb::SciUpper => 'E',
            Verb::Float => 'f',
            Verb::FloatSynonym => 'F',
            Verb::HexLower => 'x',
            Verb::HexUpper => 'X',
            Verb::Other(c) => c,
        }
    }

    /// Registered pattern for this verb, or `None` if it must be synthesized.
    pub fn pattern(self) -> Option<&'static str> {
        let p = match self {
            Verb::String => STRING_PATTERN,
            Verb::Bool => BOOL_PATTERN,
            Verb::Base2 => BASE2_PATTERN,
            Verb::Char => CHAR_PATTERN,
            Verb::Base8 => BASE8_PATTERN,
            Verb::Base8Prefix => BASE8_PREFIX_PATTERN,
            Verb::Base10 => BASE10_PATTERN,
            Verb::Unicode => UNICODE_PATTERN,
            Verb::SciLower => SCI_LOWER_PATTERN,
            Verb::SciUpper => SCI_UPPER_PATTERN,
            Verb::Float | Verb::FloatSynonym => FLOAT_PATTERN,
            Verb::HexLower => HEX_LOWER_PATTERN,
            Verb::HexUpper => HEX_UPPER_PATTERN,
            Verb::Other(_) => return None,
        };
        Some(p)
    }

    /// The capture group this verb compiles to: the registered pattern, or
    /// one-or-more of the class named by the verb letter itself.
    pub fn regex_fragment(self) -> String {
        match self.pattern() {
            Some(p) => p.to_string(),
            None => format!(r"(\{}+)", self.letter()),
        }
    }

    /// The fragment as it is compiled into a format's regex. `\d` and `\w`
    /// are scoped to ASCII so a match never captures digits the parser
    /// rejects; the group itself is unchanged.
    pub fn compiled_fragment(self) -> String {
        let fragment = self.regex_fragment();
        match self {
            Verb::Base10 | Verb::Other('w') => format!("(?-u:{})", fragment),
            _ => fragment,
        }
    }

    /// Renders `arg` the way this verb prints it. `None` if the verb does not
    /// accept that kind of value.
    pub fn render(self, arg: &Arg) -> Option<String> {
        render(self, arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for c in "stbcoOdUeEfFxX".chars() {
            let verb = Verb::from_char(c).unwrap();
            assert!(!matches!(verb, Verb::Other(_)), "{} should be registered", c);
            assert_eq!(verb.letter(), c);
        }
        assert_eq!(Verb::from_char('w'), Some(Verb::Other('w')));
        assert_eq!(Verb::from_char('2'), None);
        assert_eq!(Verb::from_char('%'), None);
    }

    #[test]
    fn decimal_uses_registered_pattern() {
        assert_eq!(Verb::Base10.pattern(), Some(r"(\d+)"));
        assert_eq!(Verb::Base10.regex_fragment(), r"(\d+)");
    }

    #[test]
    fn unregistered_verbs_synthesize_class() {
        assert_eq!(Verb::Other('w').pattern(), None);
        assert_eq!(Verb::Other('w').regex_fragment(), r"(\w+)");
    }

    #[test]
    fn float_and_synonym_share_pattern() {
        assert_eq!(Verb::Float.pattern(), Verb::FloatSynonym.pattern());
    }

    #[test]
    fn registered_patterns_accept_rendered_output() {
        let samples: [(Verb, Arg); 12] = [
            (Verb::Base2, Arg::Int(6)),
            (Verb::Base8, Arg::Int(64)),
            (Verb::Base8Prefix, Arg::Int(8)),
            (Verb::Base10, Arg::Int(0)),
            (Verb::SciLower, Arg::Float(0.5)),
            (Verb::SciUpper, Arg::Float(0.00015)),
            (Verb::Float, Arg::Float(-0.25)),
            (Verb::FloatSynonym, Arg::Float(1e6)),
            (Verb::HexLower, Arg::Float(2.0)),
            (Verb::HexLower, Arg::Float(0.1)),
            (Verb::HexUpper, Arg::Float(0.25)),
            (Verb::HexUpper, Arg::Float(-1.0)),
        ];
        for (verb, arg) in samples {
            let out = verb.render(&arg).unwrap();
            let re = regex::Regex::new(&format!("^{}$", verb.compiled_fragment())).unwrap();
            assert!(re.is_match(&out), "%{} output {} vs {}", verb.letter(), out, re);
        }
    }

    #[test]
    fn digit_classes_compile_ascii_only() {
        assert_eq!(Verb::Base10.compiled_fragment(), r"(?-u:(\d+))");
        assert_eq!(Verb::Other('w').compiled_fragment(), r"(?-u:(\w+))");
        assert_eq!(Verb::String.compiled_fragment(), STRING_PATTERN);
        let re = regex::Regex::new(&Verb::Base10.compiled_fragment()).unwrap();
        assert!(!re.is_match("\u{0664}\u{0667}"));
        assert!(re.is_match("47"));
    }

    #[test]
    fn every_registered_pattern_is_one_group() {
        for c in "stbcoOdUeEfFxX".chars() {
            let p = Verb::from_char(c).unwrap().pattern().unwrap();
            let re = regex::Regex::new(p).unwrap();
            assert_eq!(re.captures_len(), 2, "pattern {} for %{}", p, c);
        }
    }
}
