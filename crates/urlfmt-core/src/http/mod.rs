//! HTTP requests for filled format URLs.
//!
//! Uses the curl crate (libcurl) on the calling thread. Responses are read
//! in full; the body buffer is owned by the returned [`Response`].

mod client;
mod request;

pub use client::{HttpClient, Response};
pub use request::{Method, Request};
