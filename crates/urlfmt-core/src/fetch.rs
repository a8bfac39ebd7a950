//! Fetch a format URL and parse the response as HTML or JSON, optionally
//! retrying until a caller-supplied check passes.

use scraper::Html;
use serde_json::{Map, Value};

use crate::args::Arg;
use crate::error::{BoxError, Error, Result};
use crate::format::FormatUrl;
use crate::http::{HttpClient, Request, Response};
use crate::retry::{run_with_retry, RetryPolicy};

/// Decoded JSON object.
pub type JsonObject = Map<String, Value>;

impl FormatUrl {
    /// Uses `req` if given, otherwise a default GET for `args`.
    fn request_or_default(&self, req: Option<&Request>, args: &[Arg]) -> Result<Request> {
        match req {
            Some(r) => Ok(r.clone()),
            None => Ok(self.get_request(args)?.1),
        }
    }

    /// Fetches the page and parses it into a searchable HTML document.
    pub fn soup(
        &self,
        client: &HttpClient,
        req: Option<&Request>,
        args: &[Arg],
    ) -> Result<(Html, Response)> {
        let req = self.request_or_default(req, args)?;
        let resp = client.execute(&req)?;
        let doc = Html::parse_document(&resp.text());
        Ok((doc, resp))
    }

    /// Fetches the resource and decodes the body as a JSON object.
    pub fn json(
        &self,
        client: &HttpClient,
        req: Option<&Request>,
        args: &[Arg],
    ) -> Result<(JsonObject, Response)> {
        let req = self.request_or_default(req, args)?;
        let resp = client.execute(&req)?;
        let body = serde_json::from_slice::<JsonObject>(&resp.body).map_err(|source| {
            Error::Decode {
                url: resp.url.clone(),
                source,
            }
        })?;
        Ok((body, resp))
    }

    /// Runs [`FormatUrl::soup`] then `try_fn`, retrying either failure under
    /// `policy`.
    pub fn retry_soup<F>(
        &self,
        client: &HttpClient,
        req: Option<&Request>,
        policy: &RetryPolicy,
        mut try_fn: F,
        args: &[Arg],
    ) -> Result<()>
    where
        F: FnMut(&Html, &Response) -> std::result::Result<(), BoxError>,
    {
        let format = self.to_string();
        run_with_retry(policy, "Soup", &format, |_| {
            let (doc, resp) = self.soup(client, req, args)?;
            try_fn(&doc, &resp).map_err(Error::Callback)
        })
    }

    /// Runs [`FormatUrl::json`] then `try_fn`, retrying either failure under
    /// `policy`.
    pub fn retry_json<F>(
        &self,
        client: &HttpClient,
        req: Option<&Request>,
        policy: &RetryPolicy,
        mut try_fn: F,
        args: &[Arg],
    ) -> Result<()>
    where
        F: FnMut(&JsonObject, &Response) -> std::result::Result<(), BoxError>,
    {
        let format = self.to_string();
        run_with_retry(policy, "JSON", &format, |_| {
            let (body, resp) = self.json(client, req, args)?;
            try_fn(&body, &resp).map_err(Error::Callback)
        })
    }
}
