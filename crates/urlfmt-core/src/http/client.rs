//! Blocking HTTP client on a curl `Easy` handle.

use std::borrow::Cow;
use std::str;
use std::time::Duration;

use super::request::{Method, Request};
use crate::config::HttpConfig;
use crate::error::{Error, Result};

/// A completed response. The body is read in full before this is returned.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    /// URL after redirects.
    pub url: String,
    /// Header lines of the final response, without the status line.
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Value of the first header called `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Client settings shared by every fetch.
#[derive(Debug, Clone)]
pub struct HttpClient {
    timeout: Option<Duration>,
    connect_timeout: Duration,
    follow_redirects: bool,
    user_agent: Option<String>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl HttpClient {
    pub fn from_config(cfg: &HttpConfig) -> Self {
        Self {
            timeout: cfg.timeout(),
            connect_timeout: cfg.connect_timeout(),
            follow_redirects: cfg.follow_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Performs `req` on the current thread and reads the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    pub fn execute(&self, req: &Request) -> Result<Response> {
        let url = req.url.as_str();
        let network = |source: curl::Error| Error::Network {
            url: url.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(network)?;
        easy.follow_location(self.follow_redirects).map_err(network)?;
        easy.max_redirections(10).map_err(network)?;
        easy.connect_timeout(self.connect_timeout).map_err(network)?;
        if let Some(t) = self.timeout {
            easy.timeout(t).map_err(network)?;
        }
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua).map_err(network)?;
        }
        configure_method(&mut easy, req).map_err(network)?;

        // Build curl list for custom headers (e.g. "Name: value").
        if !req.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in &req.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))
                    .map_err(network)?;
            }
            easy.http_headers(list).map_err(network)?;
        }

        tracing::debug!(method = %req.method, url, "sending request");

        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        let line = s.trim_end();
                        // A new status line starts the headers of the next hop.
                        if line.starts_with("HTTP/") {
                            headers.clear();
                        } else if !line.is_empty() {
                            headers.push(line.to_string());
                        }
                    }
                    true
                })
                .map_err(network)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(network)?;
            transfer
                .perform()
                .map_err(|source| transfer_error(url, source))?;
        }

        let status = easy.response_code().map_err(network)?;
        let final_url = easy
            .effective_url()
            .map_err(network)?
            .unwrap_or(url)
            .to_string();

        tracing::debug!(status, url = %final_url, bytes = body.len(), "response received");

        Ok(Response {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}

fn configure_method(
    easy: &mut curl::easy::Easy,
    req: &Request,
) -> std::result::Result<(), curl::Error> {
    if let Some(body) = &req.body {
        easy.post_fields_copy(body)?;
    }
    match (&req.method, &req.body) {
        (Method::Get, None) => easy.get(true),
        (Method::Head, _) => easy.nobody(true),
        (Method::Post, Some(_)) => Ok(()),
        (Method::Post, None) => {
            easy.post(true)?;
            easy.post_field_size(0)
        }
        (method, _) => easy.custom_request(method.as_str()),
    }
}

/// Failures while receiving or storing the body are body read errors;
/// anything else is a network error.
fn transfer_error(url: &str, source: curl::Error) -> Error {
    let url = url.to_string();
    if source.is_recv_error()
        || source.is_read_error()
        || source.is_write_error()
        || source.is_partial_file()
        || source.is_bad_content_encoding()
    {
        Error::BodyRead { url, source }
    } else {
        Error::Network { url, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(headers: &[&str]) -> Response {
        Response {
            status: 200,
            url: "https://a.com/".into(),
            headers: headers.iter().map(|s| s.to_string()).collect(),
            body: b"hello".to_vec(),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let r = response(&["Content-Type: text/html", "X-Thing: a:b"]);
        assert_eq!(r.header("content-type"), Some("text/html"));
        assert_eq!(r.header("x-thing"), Some("a:b"));
        assert_eq!(r.header("etag"), None);
        assert!(r.is_success());
        assert_eq!(r.text(), "hello");
    }

    #[test]
    fn client_follows_config() {
        let cfg = HttpConfig {
            timeout_secs: 0,
            ..HttpConfig::default()
        };
        assert_eq!(HttpClient::from_config(&cfg).timeout(), None);
        assert_eq!(
            HttpClient::default().timeout(),
            Some(Duration::from_secs(10))
        );
    }
}
