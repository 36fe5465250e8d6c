//! Frame image storage.
//!
//! Reads and writes still images on disk and prepares the directories the
//! pipeline writes into. Every operation is synchronous; file handles are
//! owned locally and closed on drop, so error paths never leak them.

use crate::error::{CoreError, CoreResult};

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Reads the full content of a frame file.
pub fn read_frame(path: &Path) -> CoreResult<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

/// Writes `content` to `dest_dir/original_name`, replacing any existing file.
///
/// Returns the path that was written.
pub fn write_frame(dest_dir: &Path, original_name: &str, content: &[u8]) -> CoreResult<PathBuf> {
    if original_name.is_empty() || Path::new(original_name).file_name().is_none() {
        return Err(CoreError::PathError(format!(
            "Invalid frame name '{original_name}'"
        )));
    }

    let dest = dest_dir.join(original_name);
    let mut file = File::create(&dest)?;
    file.write_all(content)?;
    file.flush()?;
    Ok(dest)
}

/// Creates `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(path: &Path) -> CoreResult<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(CoreError::PathError(format!(
            "'{}' exists but is not a directory",
            path.display()
        )));
    }
    fs::create_dir_all(path)?;
    log::debug!("Created directory {}", path.display());
    Ok(())
}

/// Lists the regular files in `dir`, sorted by file name.
///
/// Decoded stills carry zero-padded sequence numbers, so name order is
/// also temporal order.
pub fn list_frames(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        match entry.file_type() {
            Ok(file_type) if file_type.is_file() => frames.push(entry.path()),
            Ok(_) => {}
            Err(e) => log::warn!(
                "Skipping {}: cannot determine file type: {}",
                entry.path().display(),
                e
            ),
        }
    }

    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(frames)
}
