//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed routes by path. A route can fail a set number of times
//! before answering normally, and `/echo` answers with a JSON description
//! of the request it received.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Respond 500 to this many requests before serving `body`.
    pub fail_first: usize,
}

impl Route {
    pub fn html(body: &str) -> Self {
        Self {
            content_type: "text/html; charset=utf-8",
            body: body.as_bytes().to_vec(),
            fail_first: 0,
        }
    }

    pub fn json(body: &str) -> Self {
        Self {
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
            fail_first: 0,
        }
    }

    pub fn failing(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }
}

/// Handle to a running server.
pub struct TestServer {
    pub base: String,
    hits: Arc<HashMap<String, AtomicUsize>>,
}

impl TestServer {
    /// Number of requests `path` has received so far.
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .get(path)
            .map(|n| n.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits: Arc<HashMap<String, AtomicUsize>> = Arc::new(
        routes
            .iter()
            .map(|(p, _)| (p.to_string(), AtomicUsize::new(0)))
            .chain(std::iter::once(("/echo".to_string(), AtomicUsize::new(0))))
            .collect(),
    );
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

/// Returns a URL on a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

struct Incoming {
    method: String,
    path: String,
    body: Vec<u8>,
}

fn read_request(stream: &mut TcpStream) -> Option<Incoming> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = std::str::from_utf8(&data[..header_end]).ok()?.to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?;
    let path = target.split('?').next().unwrap_or(target).to_string();

    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let body = data[header_end..].to_vec();
    Some(Incoming { method, path, body })
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &HashMap<String, AtomicUsize>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let req = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let seen = hits
        .get(&req.path)
        .map(|n| n.fetch_add(1, Ordering::SeqCst))
        .unwrap_or(0);

    if req.path == "/echo" {
        let body = format!(
            "{{\"method\":\"{}\",\"body\":\"{}\"}}",
            req.method,
            String::from_utf8_lossy(&req.body)
        );
        respond(&mut stream, "200 OK", "application/json", body.as_bytes());
        return;
    }

    match routes.get(&req.path) {
        Some(route) if seen < route.fail_first => {
            respond(&mut stream, "500 Internal Server Error", "text/plain", b"oops");
        }
        Some(route) => respond(&mut stream, "200 OK", route.content_type, &route.body),
        None => respond(&mut stream, "404 Not Found", "text/plain", b"not found"),
    }
}
