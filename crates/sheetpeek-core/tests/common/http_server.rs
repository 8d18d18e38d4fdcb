//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one canned response to every GET, or redirects to another URL.
//! Counts requests so tests can assert there were no retries.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// When set, respond with a 302 to this location instead.
    pub redirect_to: Option<String>,
}

impl Canned {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            body,
            redirect_to: None,
        }
    }

    pub fn status(status: u16, reason: &'static str) -> Self {
        Self {
            status,
            reason,
            content_type: "text/html; charset=utf-8",
            body: format!("<html><body>{}</body></html>", reason).into_bytes(),
            redirect_to: None,
        }
    }

    pub fn redirect(to: String) -> Self {
        Self {
            status: 302,
            reason: "Found",
            content_type: "text/html",
            body: Vec::new(),
            redirect_to: Some(to),
        }
    }
}

pub struct TestServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(canned: Canned) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    let canned = Arc::new(canned);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let canned = Arc::clone(&canned);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &canned, &hits));
        }
    });
    TestServer {
        url: format!("http://127.0.0.1:{}/export?format=xlsx", port),
        hits,
    }
}

/// A URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/export?format=xlsx", port)
}

fn handle(mut stream: std::net::TcpStream, canned: &Canned, hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let method = request.split_whitespace().next().unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    hits.fetch_add(1, Ordering::SeqCst);

    let location = canned
        .redirect_to
        .as_deref()
        .map(|to| format!("Location: {}\r\n", to))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        canned.status,
        canned.reason,
        canned.content_type,
        canned.body.len(),
        location
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&canned.body);
}
