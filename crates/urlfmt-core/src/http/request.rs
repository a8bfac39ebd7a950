//! Requests built from filled format URLs.

use std::fmt;

use crate::args::Arg;
use crate::error::{Error, Result};
use crate::format::FormatUrl;

/// HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    /// Any other method token, e.g. `PROPFIND`.
    Custom(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Custom(m) => m,
        }
    }

    /// Parses a method name. Known methods are matched case-insensitively;
    /// anything else must be a valid token (RFC 9110 `tchar`s).
    pub fn parse(s: &str) -> Option<Method> {
        let method = match s.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            _ if is_token(s) => Method::Custom(s.to_string()),
            _ => return None,
        };
        Some(method)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

/// A ready-to-send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Extra header lines as (name, value).
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Builds a request, checking that `url` is absolute and well formed.
    pub fn new(method: Method, url: impl Into<String>, body: Option<Vec<u8>>) -> Result<Self> {
        let url = url.into();
        if let Method::Custom(m) = &method {
            if !is_token(m) {
                return Err(Error::InvalidMethod {
                    url,
                    method: m.clone(),
                });
            }
        }
        if let Err(source) = url::Url::parse(&url) {
            return Err(Error::InvalidUrl { url, source });
        }
        Ok(Self {
            method,
            url,
            headers: Vec::new(),
            body,
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl FormatUrl {
    /// Fills the format with `args` and builds a request for the result.
    /// Returns the filled URL alongside the request.
    pub fn request(
        &self,
        method: Method,
        body: Option<Vec<u8>>,
        args: &[Arg],
    ) -> Result<(String, Request)> {
        let url = self.fill(args)?;
        let req = Request::new(method, url.clone(), body)?;
        Ok((url, req))
    }

    /// [`FormatUrl::request`] with `GET` and no body.
    pub fn get_request(&self, args: &[Arg]) -> Result<(String, Request)> {
        self.request(Method::Get, None, args)
    }
}
