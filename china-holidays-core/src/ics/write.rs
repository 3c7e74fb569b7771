//! Writing the generated calendar to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::HolidayResult;

/// Write `content` to `path` in one step.
///
/// The content goes to a temporary file next to `path` which then replaces
/// it, so a failed write leaves any previous calendar untouched.
pub fn save_calendar(path: &Path, content: &str) -> HolidayResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = content.len(), "Calendar written");
    Ok(())
}
