//! Parse HTTP response header lines into ResponseMeta.

/// The response headers the Fetcher cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// Parse collected header lines into ResponseMeta.
///
/// With redirects libcurl reports the headers of every hop; each status line
/// starts a new response, so only the last response's headers are kept.
pub fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            meta = ResponseMeta::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    meta.content_length = Some(n);
                }
            }
        }
    }

    meta
}
