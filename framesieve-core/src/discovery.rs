//! Video list discovery.
//!
//! The pipeline's input is a plain text file with one video path per line.
//! There is no comment or escaping syntax. Surrounding whitespace is trimmed
//! and blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads the video paths listed in `list_path`.
///
/// A list that cannot be opened yields an empty vector rather than an error,
/// so a run with a missing list completes having processed nothing. A read
/// error part way through keeps the entries read so far.
///
/// # Examples
///
/// ```rust,no_run
/// use framesieve_core::read_video_list;
/// use std::path::Path;
///
/// let videos = read_video_list(Path::new("/data/videos.txt"));
/// println!("{} videos listed", videos.len());
/// ```
pub fn read_video_list(list_path: &Path) -> Vec<PathBuf> {
    let file = match File::open(list_path) {
        Ok(file) => file,
        Err(e) => {
            log::warn!(
                "Could not open video list {}: {}. Nothing to process.",
                list_path.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut videos = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        match line {
            Ok(line) => {
                let entry = line.trim();
                if !entry.is_empty() {
                    videos.push(PathBuf::from(entry));
                }
            }
            Err(e) => {
                log::warn!(
                    "Stopped reading video list {} at line {}: {}",
                    list_path.display(),
                    line_no + 1,
                    e
                );
                break;
            }
        }
    }

    log::info!("Read {} video path(s) from {}", videos.len(), list_path.display());
    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_one_path_per_line() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("videos.txt");
        fs::write(&list, "/videos/a.mp4\n/videos/b.mkv\r\n\n  \n/videos/c d.avi").unwrap();

        let videos = read_video_list(&list);
        assert_eq!(
            videos,
            vec![
                PathBuf::from("/videos/a.mp4"),
                PathBuf::from("/videos/b.mkv"),
                PathBuf::from("/videos/c d.avi"),
            ]
        );
    }

    #[test]
    fn test_missing_list_is_empty() {
        let dir = tempdir().unwrap();
        assert!(read_video_list(&dir.path().join("absent.txt")).is_empty());
    }

    #[test]
    fn test_empty_list_is_empty() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("videos.txt");
        fs::write(&list, "").unwrap();
        assert!(read_video_list(&list).is_empty());
    }
}
