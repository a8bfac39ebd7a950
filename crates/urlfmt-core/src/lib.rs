//! Format URLs: printf-style URL templates that can be filled with
//! arguments, compiled to a regex, matched against concrete URLs, and
//! reversed to recover the arguments a URL was filled with.
//!
//! A thin fetch layer issues the filled URL over HTTP and parses the
//! response as HTML or JSON, with linear-backoff retries.

pub mod args;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod http;
pub mod logging;
pub mod retry;
pub mod verb;

pub use args::{Arg, ArgList};
pub use error::{BoxError, Error, ExtractError, FillError, Result};
pub use fetch::JsonObject;
pub use format::{CompiledFormat, FormatUrl, Protocol};
