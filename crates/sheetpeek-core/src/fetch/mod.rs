//! Fetcher: one blocking HTTP GET of the spreadsheet export.
//!
//! Uses the curl crate (libcurl) with redirects followed and bounded timeouts.
//! The whole body is collected in memory; there are no retries.

mod parse;
mod status;

pub use parse::{parse_headers, ResponseMeta};
pub use status::reason_phrase;

use crate::config::FetchConfig;
use crate::error::FetchError;
use std::str;
use std::time::Duration;

/// Response body of a successful fetch plus what the server said about it.
#[derive(Debug, Clone)]
pub struct Payload {
    pub bytes: Vec<u8>,
    /// `Content-Type` of the final (post-redirect) response.
    pub content_type: Option<String>,
    /// URL that actually served the body, after redirects.
    pub effective_url: Option<String>,
}

impl Payload {
    /// True when the server labelled the body as an HTML page rather than a document.
    pub fn looks_like_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/html"))
            .unwrap_or(false)
    }
}

fn transport(url: &str) -> impl Fn(curl::Error) -> FetchError + '_ {
    move |source| FetchError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Performs a GET of `url` and returns the full response body.
///
/// Any non-2xx final status is an error; the body of such a response is discarded.
pub fn fetch(url: &str, opts: &FetchConfig) -> Result<Payload, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let mut header_lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transport(url))?;
    easy.get(true).map_err(transport(url))?;
    easy.follow_location(true).map_err(transport(url))?;
    easy.max_redirections(opts.max_redirections)
        .map_err(transport(url))?;
    easy.connect_timeout(Duration::from_secs(opts.connect_timeout_secs))
        .map_err(transport(url))?;
    easy.timeout(Duration::from_secs(opts.timeout_secs))
        .map_err(transport(url))?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(transport(url))?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport(url))?;
        transfer.perform().map_err(transport(url))?;
    }

    let code = easy.response_code().map_err(transport(url))?;
    if !(200..300).contains(&code) {
        tracing::warn!(status = code, "GET {} returned HTTP {}", url, code);
        return Err(FetchError::Status {
            url: url.to_string(),
            status: code,
            reason: reason_phrase(code),
        });
    }

    let meta = parse_headers(&header_lines);
    let received = body.len() as u64;
    if let Some(expected) = meta.content_length {
        if received != expected {
            return Err(FetchError::PartialTransfer { expected, received });
        }
    }

    let effective_url = easy
        .effective_url()
        .ok()
        .flatten()
        .map(str::to_string);

    let payload = Payload {
        bytes: body,
        content_type: meta.content_type,
        effective_url,
    };
    tracing::info!(
        bytes = received,
        content_type = payload.content_type.as_deref().unwrap_or("-"),
        "GET {} complete",
        url
    );
    if payload.looks_like_html() {
        tracing::warn!(
            "{} served an HTML page; the document may not be shared publicly",
            url
        );
    }
    Ok(payload)
}
