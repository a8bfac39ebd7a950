//! Leading protocol segment of a format URL.

/// The protocol forms a format URL can start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// `%s://`, filled with `https` by [`FormatUrl::fill`](super::FormatUrl::fill).
    Placeholder,
    /// `https?://`, used when compiling to a regex.
    RegexAlternation,
    Http,
    Https,
    /// No protocol segment.
    None,
}

/// Scan order for [`Protocol::detect`]. The last literal that prefixes the
/// string wins.
const SCAN_ORDER: [Protocol; 4] = [
    Protocol::Placeholder,
    Protocol::RegexAlternation,
    Protocol::Http,
    Protocol::Https,
];

impl Protocol {
    pub fn literal(self) -> &'static str {
        match self {
            Protocol::Placeholder => "%s://",
            Protocol::RegexAlternation => "https?://",
            Protocol::Http => "http://",
            Protocol::Https => "https://",
            Protocol::None => "",
        }
    }

    /// Finds the protocol `s` currently starts with.
    pub fn detect(s: &str) -> Protocol {
        let mut found = Protocol::None;
        for p in SCAN_ORDER {
            if s.starts_with(p.literal()) {
                found = p;
            }
        }
        found
    }

    /// Splits `s` into its current protocol and the remainder.
    pub fn split(s: &str) -> (Protocol, &str) {
        let p = Protocol::detect(s);
        (p, &s[p.literal().len()..])
    }

    /// Replaces the protocol `s` starts with (if any) by `self`.
    pub fn apply(self, s: &str) -> String {
        let (_, rest) = Protocol::split(s);
        format!("{}{}", self.literal(), rest)
    }
}
