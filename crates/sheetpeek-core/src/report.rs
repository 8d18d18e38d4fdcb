//! Run driver: Fetcher -> Persister -> Header Reporter, then one rendered outcome.
//!
//! Nothing reaches the output until the run has finished, so a failure prints a
//! single `Error:` line and never a partial header list.

use crate::checksum;
use crate::config::SheetConfig;
use crate::error::ReportError;
use crate::fetch;
use crate::mapping::ColumnMapping;
use crate::sheet;
use crate::storage;
use std::io::{self, Write};
use std::path::PathBuf;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source_url: String,
    /// Where the workbook was saved; the file outlives the run.
    pub destination: PathBuf,
    /// Column labels of the first worksheet, left to right.
    pub headers: Vec<String>,
}

/// Executes the three steps in order, stopping at the first failure.
pub fn run(config: &SheetConfig) -> Result<Report, ReportError> {
    let url = config.source_url.as_str();
    let destination = &config.destination_path;

    tracing::info!("downloading {}", url);
    let payload = fetch::fetch(url, &config.fetch)?;
    if let Some(effective) = payload.effective_url.as_deref() {
        if effective != url {
            tracing::debug!("redirected to {}", effective);
        }
    }

    storage::persist(&payload.bytes, destination)?;
    drop(payload);
    // Digest of what is actually on disk after the rename; a failure here is
    // only logged, the header read below reports real read problems.
    match checksum::sha256_path(destination) {
        Ok(digest) => tracing::debug!(
            sha256 = %digest,
            "persisted payload to {}",
            destination.display()
        ),
        Err(e) => tracing::warn!("could not checksum {}: {:#}", destination.display(), e),
    }

    let headers = sheet::read_headers(destination)?;

    Ok(Report {
        source_url: config.source_url.clone(),
        destination: destination.clone(),
        headers,
    })
}

impl Report {
    fn write_preamble<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Downloading from {}...", self.source_url)?;
        writeln!(out, "Download complete.")?;
        writeln!(out, "Headers List:")
    }

    /// Renders the success block: progress lines, `Headers List:`, one `- <header>` per column.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_preamble(out)?;
        for header in &self.headers {
            writeln!(out, "- {}", header)?;
        }
        Ok(())
    }

    /// Like [`Report::write_to`] but annotates each header with its canonical
    /// field and ends with the required fields the sheet lacks.
    pub fn write_mapped_to<W: Write>(&self, out: &mut W, mapping: &ColumnMapping) -> io::Result<()> {
        self.write_preamble(out)?;
        for header in &self.headers {
            match mapping.resolve(header) {
                Some(field) => writeln!(out, "- {} -> {}", header, field)?,
                None => writeln!(out, "- {}", header)?,
            }
        }
        let missing = mapping.missing_fields(&self.headers);
        if missing.is_empty() {
            writeln!(out, "Missing fields: none")
        } else {
            writeln!(out, "Missing fields: {}", missing.join(", "))
        }
    }
}

/// Renders exactly one outcome: the success block, or a single `Error: <cause>` line.
pub fn write_outcome<W: Write>(
    outcome: &Result<Report, ReportError>,
    out: &mut W,
    mapping: Option<&ColumnMapping>,
) -> io::Result<()> {
    match (outcome, mapping) {
        (Ok(report), Some(mapping)) => report.write_mapped_to(out, mapping)?,
        (Ok(report), None) => report.write_to(out)?,
        (Err(err), _) => {
            tracing::error!(kind = ?err.kind(), "run failed: {}", err);
            writeln!(out, "Error: {}", err)?;
        }
    }
    out.flush()
}
