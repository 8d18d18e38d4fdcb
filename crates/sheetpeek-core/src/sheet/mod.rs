//! Header Reporter: reads the column labels of a saved spreadsheet.
//!
//! Only the first worksheet is read. The header row is the first row of the
//! sheet's used range.

mod headers;

pub use headers::header_labels;

use crate::error::ParseError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Opens `path` (xlsx, xls, xlsb or ods) and returns the first worksheet's headers
/// in left-to-right order.
///
/// An empty worksheet, or one whose first row is blank, yields an empty list.
pub fn read_headers(path: &Path) -> Result<Vec<String>, ParseError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names();
    tracing::debug!(sheets = ?sheet_names, "opened {}", path.display());

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ParseError::NoWorksheets {
            path: path.to_path_buf(),
        })?
        .map_err(|source| ParseError::Worksheet {
            path: path.to_path_buf(),
            source,
        })?;

    // The used range starts at the first non-empty column; blank columns to
    // its left are still columns and keep their absolute positions.
    let headers = match (range.start(), range.rows().next()) {
        (Some((_, first_col)), Some(row)) => {
            let mut padded = vec![Data::Empty; first_col as usize];
            padded.extend_from_slice(row);
            header_labels(&padded)
        }
        _ => Vec::new(),
    };
    tracing::info!(
        columns = headers.len(),
        rows = range.height(),
        "read headers from {}",
        path.display()
    );
    Ok(headers)
}
