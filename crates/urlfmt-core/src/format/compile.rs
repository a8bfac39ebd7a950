//! A format URL compiled to a regex, with one [`Group`] per verb.

use regex::Regex;
use std::fmt;

use super::protocol::Protocol;
use super::template::{tokenize, Token};
use crate::args::Arg;
use crate::error::{Error, ExtractError, Result};
use crate::verb::{parser_for, Parser, Verb};

/// One capture group of a compiled format URL.
#[derive(Clone)]
pub struct Group {
    pub verb: Verb,
    /// The group's registry pattern text, e.g. `(\d+)`; parsers are keyed
    /// by it. The regex source may wrap it in flags, see
    /// [`Verb::compiled_fragment`].
    pub pattern: String,
    parser: Option<Parser>,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("verb", &self.verb)
            .field("pattern", &self.pattern)
            .field("parsed", &self.parser.is_some())
            .finish()
    }
}

impl Group {
    fn new(verb: Verb) -> Self {
        let pattern = verb.regex_fragment();
        let parser = parser_for(&pattern);
        Self {
            verb,
            pattern,
            parser,
        }
    }

    /// Turns a captured substring into an arg. Groups without a parser keep
    /// the raw string.
    pub fn parse(&self, text: &str) -> Result<Arg, ExtractError> {
        match self.parser {
            Some(parse) => parse(text).map_err(|source| ExtractError::Parse {
                value: text.to_string(),
                pattern: self.pattern.clone(),
                source,
            }),
            None => Ok(Arg::Str(text.to_string())),
        }
    }
}

/// Regex plus the verb, pattern and parser behind each of its groups, in
/// left-to-right order.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    regex: Regex,
    groups: Vec<Group>,
}

impl CompiledFormat {
    /// Compiles `template`. The protocol segment becomes `https?://`, literal
    /// text is escaped, and each verb becomes its capture group.
    pub fn new(template: &str) -> Result<Self> {
        let (_, rest) = Protocol::split(template);
        let mut source = String::from(Protocol::RegexAlternation.literal());
        let mut groups = Vec::new();

        for token in tokenize(rest) {
            match token {
                Token::Literal(text) => source.push_str(&regex::escape(&text)),
                Token::Verb(verb) => {
                    let group = Group::new(verb);
                    source.push_str(&verb.compiled_fragment());
                    groups.push(group);
                }
            }
        }

        let regex = Regex::new(&source).map_err(|source| Error::Pattern {
            format: template.to_string(),
            source,
        })?;
        Ok(Self { regex, groups })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Unanchored: trailing (or leading) text around the match is allowed.
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Extracts one typed arg per group from the leftmost match in `url`.
    pub fn extract(&self, url: &str) -> Result<Vec<Arg>, ExtractError> {
        let caps = self
            .regex
            .captures(url)
            .ok_or_else(|| ExtractError::NoMatch {
                url: url.to_string(),
                pattern: self.regex.as_str().to_string(),
            })?;

        let matched = caps.len() - 1;
        if matched != self.groups.len() {
            return Err(ExtractError::GroupCount {
                pattern: self.regex.as_str().to_string(),
                matched,
                expected: self.groups.len(),
            });
        }

        caps.iter()
            .skip(1)
            .zip(&self.groups)
            .map(|(m, group)| group.parse(m.map_or("", |m| m.as_str())))
            .collect()
    }
}
