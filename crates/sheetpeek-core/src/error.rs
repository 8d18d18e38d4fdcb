//! Failure taxonomy for a run: one enum per step plus the outcome-level union.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The Fetcher could not produce the response body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, TLS, timeout or any other libcurl failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {reason} for url: {url}")]
    Status {
        url: String,
        status: u32,
        reason: &'static str,
    },
    /// Fewer body bytes arrived than the response's Content-Length announced.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
}

/// The Persister could not write the payload to its destination.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The Header Reporter could not read a header row from the saved file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open spreadsheet {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("spreadsheet {} contains no worksheets", .path.display())]
    NoWorksheets { path: PathBuf },
    #[error("failed to read first worksheet of {}: {source}", .path.display())]
    Worksheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}

/// Which step a run failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Persist,
    Parse,
}

/// Outcome-level failure of a run: exactly one of the three step failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ReportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ReportError::Fetch(_) => FailureKind::Fetch,
            ReportError::Persist(_) => FailureKind::Persist,
            ReportError::Parse(_) => FailureKind::Parse,
        }
    }
}
