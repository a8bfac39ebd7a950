//! Retry and backoff policy.
//!
//! Decides whether a failed fetch (or a failed caller check on the fetched
//! document) should be tried again, and how long to sleep first. Backoff is
//! linear and shrinks as attempts run out: the sleep after attempt `n` is
//! `(max_attempts + 1 - n) * base_delay`.

mod classify;
mod policy;
mod run;

pub use classify::{classify, ErrorKind};
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
