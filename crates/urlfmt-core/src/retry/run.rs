//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::error::{Error, Result};

/// Runs `f` (given the 1-based attempt number) until it succeeds or the
/// policy says to stop, sleeping for the backoff between attempts.
///
/// When attempts run out the last error is wrapped in
/// [`Error::RetriesExhausted`], naming `what` was being requested for
/// `format`. Permanent errors end the loop early and are wrapped the same
/// way. Fatal errors are returned as-is on the attempt they occur.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, what: &str, format: &str, mut f: F) -> Result<T>
where
    F: FnMut(u32) -> Result<T>,
{
    let mut attempt = 1u32;
    loop {
        let err = match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };
        let kind = classify::classify(&err);
        match policy.decide(attempt, kind) {
            RetryDecision::RetryAfter(d) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = d.as_millis() as u64,
                    "{} for {} failed, retrying: {}",
                    what,
                    format,
                    err
                );
                if !d.is_zero() {
                    std::thread::sleep(d);
                }
                attempt += 1;
            }
            RetryDecision::NoRetry if kind == classify::ErrorKind::Fatal => return Err(err),
            RetryDecision::NoRetry => {
                let operation = match err {
                    Error::Callback(_) => "calling try function".to_string(),
                    _ => format!("requesting {}", what),
                };
                return Err(Error::RetriesExhausted {
                    operation,
                    format: format.to_string(),
                    attempts: attempt,
                    source: Box::new(err),
                });
            }
        }
    }
}
