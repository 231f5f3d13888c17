// somnus-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Directory a file lives in; `.` for bare file names.
fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Creates the directory that will hold `path`, if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), InfrastructureError> {
    fs::create_dir_all(parent_dir(path)).map_err(InfrastructureError::Io)
}

/// Writes a file atomically: the content goes to a temporary file in the
/// destination directory which is then renamed over `path`.
///
/// The target is either fully written or untouched; a failing `write`
/// callback leaves no partial artifact behind.
pub fn atomic_write_with<P, F>(path: P, write: F) -> Result<(), InfrastructureError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<(), InfrastructureError>,
{
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    // Same directory as the target so the rename never crosses filesystems
    let temp_file = tempfile::NamedTempFile::new_in(parent_dir(path))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    atomic_write_with(path, |w| {
        w.write_all(content.as_ref())?;
        Ok(())
    })
}
