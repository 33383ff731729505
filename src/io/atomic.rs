use crate::{ManifestError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `contents` to `path` all-or-nothing.
///
/// Data goes to a temporary file next to the destination which is then
/// renamed over it. On any error the temporary file is dropped (and
/// deleted) and the destination is untouched. The parent directory must
/// already exist.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = NamedTempFile::new_in(&parent).map_err(write_error)?;
    temp.write_all(contents).map_err(write_error)?;
    temp.flush().map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;

    // Temp files are created owner-only; keep the destination's mode.
    match fs::metadata(path) {
        Ok(metadata) => temp
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?,
        Err(_) => set_default_permissions(temp.as_file()).map_err(write_error)?,
    }

    temp.persist(path).map_err(|e| write_error(e.error))?;
    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
