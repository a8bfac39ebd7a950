//! Classify errors into retry policy error kinds.

use crate::error::Error;

/// Classification of an error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, body, decode or callback failures; worth another attempt.
    Retryable,
    /// The request could not be built. Every attempt would fail the same
    /// way, so the loop stops but still reports what it was doing.
    Permanent,
    /// Invariant violations and parser failures; retrying cannot help.
    Fatal,
}

pub fn classify(e: &Error) -> ErrorKind {
    match e {
        e if e.is_fatal() => ErrorKind::Fatal,
        Error::Fill(_) | Error::InvalidUrl { .. } | Error::InvalidMethod { .. } => {
            ErrorKind::Permanent
        }
        _ => ErrorKind::Retryable,
    }
}
