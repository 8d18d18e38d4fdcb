//! Persister: writes the downloaded payload to its destination.
//!
//! Bytes go to a uniquely named temp file in the destination's directory, are
//! fsynced, then renamed over the destination.

use crate::error::PersistError;
use std::io::Write;
use std::path::Path;

/// Suffix of the temp file that holds the payload until the rename.
///
/// Names are randomized (`.sheetpeek-XXXXXX.part`), so an existing
/// `<destination>.part` or other user file is never touched; a failed write
/// removes only its own temp file. The rename replaces the destination entry
/// itself: a symlink at the destination is replaced by a regular file, not
/// written through.
pub const TEMP_SUFFIX: &str = ".part";

const TEMP_PREFIX: &str = ".sheetpeek-";

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `bytes` to `destination`, creating it if absent and replacing it if present.
///
/// The parent directory must already exist.
pub fn persist(bytes: &[u8], destination: &Path) -> Result<(), PersistError> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(io_err(destination))?;
    temp.write_all(bytes).map_err(io_err(destination))?;
    temp.as_file().sync_all().map_err(io_err(destination))?;

    // On failure the temp file is dropped with the error, which deletes it.
    temp.persist(destination)
        .map_err(|e| io_err(destination)(e.error))?;

    tracing::info!(bytes = bytes.len(), "saved {}", destination.display());
    Ok(())
}
