//! Format URLs.
//!
//! A [`FormatUrl`] is a URL template with printf-style verbs, e.g.
//! `%s://store.steampowered.com/app/%d`. The leading `%s://` is the protocol
//! placeholder, which [`FormatUrl::fill`] always fills with `https`. The same
//! template compiles to a regex that matches concrete URLs and pulls the
//! arguments back out of them.

mod compile;
mod protocol;
mod template;

pub use compile::{CompiledFormat, Group};
pub use protocol::Protocol;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::args::Arg;
use crate::error::{Error, FillError, Result};

/// A URL template. Cheap to define as a constant:
///
/// ```
/// use urlfmt_core::FormatUrl;
///
/// const STEAM_APP: FormatUrl = FormatUrl::from_static("%s://store.steampowered.com/app/%d");
/// assert_eq!(
///     STEAM_APP.fill(&[477160.into()]).unwrap(),
///     "https://store.steampowered.com/app/477160"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatUrl(Cow<'static, str>);

impl FormatUrl {
    pub const fn from_static(template: &'static str) -> Self {
        FormatUrl(Cow::Borrowed(template))
    }

    pub fn new(template: impl Into<String>) -> Self {
        FormatUrl(Cow::Owned(template.into()))
    }

    /// The template exactly as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The protocol the template currently starts with.
    pub fn protocol(&self) -> Protocol {
        Protocol::detect(&self.0)
    }

    /// The template with its protocol segment replaced by `target` (or added,
    /// if it had none).
    pub fn with_protocol(&self, target: Protocol) -> String {
        target.apply(&self.0)
    }

    /// Interpolates `args` into the template. `"https"` is always supplied as
    /// the protocol argument, so callers pass only the remaining verbs.
    pub fn fill(&self, args: &[Arg]) -> Result<String, FillError> {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(Arg::from("https"));
        all.extend_from_slice(args);

        template::interpolate(&self.with_protocol(Protocol::Placeholder), &all).map_err(|e| match e {
            FillError::MissingArgument { index, verb } => FillError::MissingArgument {
                index: index.saturating_sub(1),
                verb,
            },
            FillError::BadArgument {
                index,
                verb,
                found,
                value,
            } => FillError::BadArgument {
                index: index.saturating_sub(1),
                verb,
                found,
                value,
            },
            other => other,
        })
    }

    /// Compiles the template. Each call compiles afresh.
    pub fn compile(&self) -> Result<CompiledFormat> {
        CompiledFormat::new(&self.0)
    }

    pub fn regex(&self) -> Result<Regex> {
        Ok(self.compile()?.regex().clone())
    }

    /// True if `url` contains a match for this format. A template that does
    /// not compile matches nothing.
    pub fn is_match(&self, url: &str) -> bool {
        self.compile().map(|c| c.is_match(url)).unwrap_or(false)
    }

    /// The typed args, in verb order, that `url` was filled with. The
    /// protocol is not among them.
    pub fn extract_args(&self, url: &str) -> Result<Vec<Arg>> {
        Ok(self.compile()?.extract(url)?)
    }

    /// Refills the format with the args extracted from `url`, normalizing
    /// its protocol to `https`.
    pub fn standardise(&self, url: &str) -> Result<String> {
        let args = self.extract_args(url)?;
        Ok(self.fill(&args)?)
    }
}

/// Renders the template in placeholder form (`%s://...`).
impl fmt::Display for FormatUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.with_protocol(Protocol::Placeholder))
    }
}

impl From<&'static str> for FormatUrl {
    fn from(template: &'static str) -> Self {
        FormatUrl::from_static(template)
    }
}

impl From<String> for FormatUrl {
    fn from(template: String) -> Self {
        FormatUrl::new(template)
    }
}

/// Parses and checks that the template compiles.
impl FromStr for FormatUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let format = FormatUrl::new(s);
        format.compile()?;
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEAM_APP: FormatUrl = FormatUrl::from_static("%s://store.steampowered.com/app/%d");
    const ITCH_GAME: FormatUrl = FormatUrl::from_static("%s://%s.itch.io/%s");

    #[test]
    fn regex_for_decimal_verb() {
        assert_eq!(
            STEAM_APP.regex().unwrap().as_str(),
            r"https?://store\.steampowered\.com/app/(?-u:(\d+))"
        );
    }

    #[test]
    fn regex_for_two_string_verbs() {
        assert_eq!(
            ITCH_GAME.regex().unwrap().as_str(),
            r"https?://([a-zA-Z0-9-._~]+)\.itch\.io/([a-zA-Z0-9-._~]+)"
        );
    }

    #[test]
    fn regex_ignores_the_written_protocol() {
        let plain = FormatUrl::from_static("http://example.com/%d");
        let none = FormatUrl::from_static("example.com/%d");
        assert_eq!(plain.regex().unwrap().as_str(), r"https?://example\.com/(?-u:(\d+))");
        assert_eq!(none.regex().unwrap().as_str(), r"https?://example\.com/(?-u:(\d+))");
    }

    #[test]
    fn match_scenarios() {
        assert!(STEAM_APP.is_match("http://store.steampowered.com/app/477160"));
        assert!(STEAM_APP.is_match("http://store.steampowered.com/app/477160/Human_Fall_Flat/"));
        assert!(STEAM_APP.is_match("https://store.steampowered.com/app/477160"));
        assert!(!STEAM_APP.is_match("https://store.steampowered.com/app/Human_Fall_Flat/"));
        assert!(ITCH_GAME.is_match("https://hempuli.itch.io/baba-files-taxes"));
        assert!(ITCH_GAME.is_match("https://sokpop.itch.io/ballspell"));
    }

    #[test]
    fn extract_scenarios() {
        assert_eq!(
            STEAM_APP.extract_args("http://store.steampowered.com/app/477160").unwrap(),
            vec![Arg::Int(477160)]
        );
        assert_eq!(
            STEAM_APP
                .extract_args("https://store.steampowered.com/app/477160/Human_Fall_Flat/")
                .unwrap(),
            vec![Arg::Int(477160)]
        );
        assert_eq!(
            ITCH_GAME.extract_args("https://hempuli.itch.io/baba-files-taxes").unwrap(),
            vec![Arg::from("hempuli"), Arg::from("baba-files-taxes")]
        );
    }

    #[test]
    fn fill_forces_https() {
        assert_eq!(
            STEAM_APP.fill(&[Arg::from(477160)]).unwrap(),
            "https://store.steampowered.com/app/477160"
        );
        let plain = FormatUrl::from_static("http://example.com/%s");
        assert_eq!(plain.fill(&["x".into()]).unwrap(), "https://example.com/x");
    }

    #[test]
    fn fill_errors_index_caller_args() {
        assert_eq!(
            STEAM_APP.fill(&[]),
            Err(FillError::MissingArgument { index: 0, verb: 'd' })
        );
        assert!(matches!(
            ITCH_GAME.fill(&["a".into(), 3.into()]),
            Err(FillError::BadArgument { index: 1, verb: 's', .. })
        ));
        assert_eq!(
            STEAM_APP.fill(&[1.into(), 2.into()]),
            Err(FillError::ExtraArguments { count: 1 })
        );
    }

    #[test]
    fn standardise_is_idempotent() {
        let urls = [
            (&STEAM_APP, "http://store.steampowered.com/app/477160/Human_Fall_Flat/"),
            (&ITCH_GAME, "http://sokpop.itch.io/ballspell"),
        ];
        for (format, url) in urls {
            let once = format.standardise(url).unwrap();
            assert!(once.starts_with("https://"));
            assert!(format.is_match(&once));
            assert_eq!(format.standardise(&once).unwrap(), once);
        }
        assert_eq!(
            STEAM_APP
                .standardise("http://store.steampowered.com/app/477160/Human_Fall_Flat/")
                .unwrap(),
            "https://store.steampowered.com/app/477160"
        );
    }

    #[test]
    fn standardise_is_idempotent_for_every_registered_verb() {
        // (verb, matching but non-canonical path, canonical path)
        let cases = [
            ("%s", "abc~1", "abc~1"),
            ("%t", "false", "false"),
            ("%b", "0101", "101"),
            ("%c", "xyz", "x"),
            ("%o", "017", "17"),
            ("%O", "0o017", "0o17"),
            ("%d", "007", "7"),
            ("%e", "0.5e+00", "5.000000e-01"),
            ("%e", "1.5e+02", "1.500000e+02"),
            ("%E", "15.0E-01", "1.500000E+00"),
            ("%f", "1.5", "1.500000"),
            ("%F", "-0.25", "-0.250000"),
            ("%x", "0x1.0p+01", "0x1p+01"),
            ("%x", "0x0.8p+00", "0x1p-01"),
            ("%X", "0X1.0P+01", "0X1P+01"),
            ("%X", "-0X0.4P+00", "-0X1P-02"),
        ];
        for (verb, path, canonical) in cases {
            let format = FormatUrl::new(format!("%s://example.com/{}", verb));
            let url = format!("http://example.com/{}", path);
            assert!(format.is_match(&url), "{} should match {}", verb, url);

            let once = format.standardise(&url).unwrap();
            assert_eq!(once, format!("https://example.com/{}", canonical), "{}", verb);
            assert!(format.is_match(&once), "{} should match its own output {}", verb, once);
            assert_eq!(format.standardise(&once).unwrap(), once, "{}", verb);
        }
    }

    #[test]
    fn hex_float_fill_round_trips() {
        let lower = FormatUrl::from_static("%s://example.com/%x");
        let upper = FormatUrl::from_static("%s://example.com/%X");
        for x in [2.0, 1.0, 1024.0, -8.0, 0.5, 0.25, 0.1, -0.75, 0.0] {
            for format in [&lower, &upper] {
                let url = format.fill(&[Arg::from(x)]).unwrap();
                assert!(format.is_match(&url), "{} should match", url);
                assert_eq!(format.extract_args(&url).unwrap(), vec![Arg::Float(x)], "{}", url);
            }
        }
    }

    #[test]
    fn decimal_verb_matches_ascii_digits_only() {
        assert!(STEAM_APP.regex().unwrap().as_str().contains(r"(\d+)"));
        let url = "https://store.steampowered.com/app/\u{0664}\u{0667}";
        assert!(!STEAM_APP.is_match(url));
        assert!(!STEAM_APP.extract_args(url).unwrap_err().is_fatal());
    }

    #[test]
    fn typed_round_trip_through_every_registered_verb() {
        let format = FormatUrl::from_static(
            "%s://example.com/%s/%t/%b/%c/%o/%O/%d/%e/%E/%f/%F/%x/%X",
        );
        let args = vec![
            Arg::from("name"),
            Arg::from(true),
            Arg::from(5),
            Arg::from('z'),
            Arg::from(15),
            Arg::from(8),
            Arg::from(42),
            Arg::from(123456000.0),
            Arg::from(150.0),
            Arg::from(1.5),
            Arg::from(-2.25),
            Arg::from(3.0),
            Arg::from(-3.0),
        ];
        let url = format.fill(&args).unwrap();
        assert_eq!(
            url,
            "https://example.com/name/true/101/z/17/0o10/42/1.234560e+08/1.500000E+02/1.500000/-2.250000/0x1.8p+01/-0X1.8P+01"
        );
        assert_eq!(format.extract_args(&url).unwrap(), args);
    }

    #[test]
    fn unicode_verb_extracts_nil() {
        let format = FormatUrl::from_static("%s://example.com/%U");
        let url = format.fill(&[Arg::from(1234)]).unwrap();
        assert_eq!(url, "https://example.com/U+04D2");
        assert_eq!(format.extract_args(&url).unwrap(), vec![Arg::Nil]);
        // Nil cannot be refilled, so standardising a %U URL fails cleanly.
        assert!(matches!(
            format.standardise(&url),
            Err(Error::Fill(FillError::BadArgument { found: "nil", .. }))
        ));
    }

    #[test]
    fn literal_percent_in_query() {
        let format = FormatUrl::from_static("%s://a.com/q?x=100%%&p=%2Fz&id=%d");
        let url = format.fill(&[7.into()]).unwrap();
        assert_eq!(url, "https://a.com/q?x=100%&p=%2Fz&id=7");
        assert_eq!(format.extract_args(&url).unwrap(), vec![Arg::Int(7)]);
    }

    #[test]
    fn display_uses_placeholder() {
        let f = FormatUrl::from_static("https://example.com/%d");
        assert_eq!(f.to_string(), "%s://example.com/%d");
        assert_eq!(f.protocol(), Protocol::Https);
        assert_eq!(STEAM_APP.protocol(), Protocol::Placeholder);
    }

    #[test]
    fn from_str_checks_pattern() {
        assert!("%s://a.com/%d".parse::<FormatUrl>().is_ok());
        assert!("%s://a.com/%q".parse::<FormatUrl>().is_err());
        assert!(!FormatUrl::from_static("%s://a.com/%q").is_match("https://a.com/q"));
    }

    #[test]
    fn no_match_extract_is_recoverable() {
        let err = STEAM_APP.extract_args("https://example.com/").unwrap_err();
        assert!(!err.is_fatal());
    }
}
