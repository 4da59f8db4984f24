use std::io::Write;
use std::path::Path;

use crate::core::BookmarkError;

/// Write `bytes` to `path` atomically.
///
/// The data is staged in a temporary file in the destination directory and
/// renamed into place on success, so a failing write never leaves a
/// half-written output file behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), BookmarkError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| BookmarkError::file_access(path, e))?;
    tmp.write_all(bytes)
        .map_err(|e| BookmarkError::file_access(path, e))?;
    tmp.persist(path)
        .map_err(|e| BookmarkError::file_access(path, e.error))?;

    Ok(())
}
