//! Error types for filling, compiling, extracting and fetching format URLs.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// Error type returned by caller-supplied `try` callbacks in the retry wrappers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A registered parser rejected a captured substring.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error(transparent)]
    Bool(#[from] ParseBoolError),
    #[error("empty capture")]
    Empty,
    #[error("malformed hexadecimal float")]
    HexFloat,
}

/// Arguments did not line up with the verbs of the template.
///
/// `index` counts the caller's arguments from 0; the protocol slot that
/// `fill` supplies itself is not counted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FillError {
    #[error("missing argument {index} for %{verb}")]
    MissingArgument { index: usize, verb: char },
    #[error("%{verb} cannot format {found} argument {value:?} (argument {index})")]
    BadArgument {
        index: usize,
        verb: char,
        found: &'static str,
        value: String,
    },
    #[error("{count} extra argument(s) left over after the last verb")]
    ExtraArguments { count: usize },
    #[error("%{verb} is not a supported verb")]
    UnsupportedVerb { verb: char },
}

/// Failure while pulling typed args back out of a concrete URL.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{url:?} does not match {pattern}")]
    NoMatch { url: String, pattern: String },
    #[error("could not parse string {value:?} using parser for {pattern:?}")]
    Parse {
        value: String,
        pattern: String,
        #[source]
        source: ParseError,
    },
    /// The live match and the compiled group list disagree. Never expected.
    #[error("internal: {matched} groups matched by {pattern} but {expected} groups were compiled")]
    GroupCount {
        pattern: String,
        matched: usize,
        expected: usize,
    },
}

impl ExtractError {
    /// Parse failures and group-count mismatches are unrecoverable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExtractError::NoMatch { .. })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fill(#[from] FillError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("format URL {format:?} compiles to an invalid pattern")]
    Pattern {
        format: String,
        #[source]
        source: regex::Error,
    },

    #[error("request for {url:?} could not be created")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request for {url:?} could not be created: invalid method {method:?}")]
    InvalidMethod { url: String, method: String },

    #[error("could not fetch {url}")]
    Network {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("could not read response body from {url}")]
    BodyRead {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("JSON could not be parsed from response from {url:?}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("try function failed")]
    Callback(#[source] BoxError),

    #[error("ran out of tries ({attempts} total) whilst {operation} for {format}")]
    RetriesExhausted {
        operation: String,
        format: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// True for invariant violations and parser failures: retrying or
    /// continuing with a partial result is never correct.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Extract(e) => e.is_fatal(),
            Error::Pattern { .. } => true,
            Error::RetriesExhausted { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}
