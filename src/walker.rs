//! Directory walker
//!
//! Single-level traversal primitive shared by every projection. Enumerates a
//! directory's immediate children, splits files from subdirectories, and
//! sorts each case-insensitively so that all views render identically.
//!
//! Failure is soft throughout: an unreadable directory becomes an `Err` the
//! caller absorbs, an unreadable file keeps its entry with an empty stat and
//! a recorded issue. Nothing here ever aborts a scan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::classify::classify;
use crate::models::FileEntry;

/// One recovered problem encountered during a scan.
///
/// Accumulated alongside best-effort results; callers may log these but a
/// scan never fails because of them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanIssue {
    /// Path the problem occurred at
    pub path: String,
    /// Human-readable description of what went wrong
    pub detail: String,
}

impl ScanIssue {
    pub fn new(path: &Path, detail: impl Into<String>) -> Self {
        Self {
            path: path.to_string_lossy().to_string(),
            detail: detail.into(),
        }
    }
}

/// A subdirectory child of a listed directory
#[derive(Debug, Clone)]
pub struct DirChild {
    /// Directory name (basename)
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
}

/// Immediate children of one directory, files and subdirectories apart.
///
/// Both lists are sorted case-insensitively by name. Callers visit `dirs`
/// before `files`; combined with the per-list sort this is the folders-first
/// ordering contract every view relies on.
#[derive(Debug, Default)]
pub struct DirListing {
    pub files: Vec<FileEntry>,
    pub dirs: Vec<DirChild>,
    /// Per-file problems (stat failures) recovered while listing
    pub issues: Vec<ScanIssue>,
}

/// List the immediate children of `dir`.
///
/// Returns `Err` when the directory itself cannot be read (missing,
/// permission denied, vanished mid-scan); the caller decides whether that
/// means "empty" or "no node". Individual entries that fail to stat stay in
/// the listing with size 0 and no timestamp, with an issue recorded.
pub fn list_children(dir: &Path) -> Result<DirListing, ScanIssue> {
    let read_dir = std::fs::read_dir(dir)
        .map_err(|e| ScanIssue::new(dir, format!("failed to read directory: {}", e)))?;

    let mut listing = DirListing::default();

    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                listing
                    .issues
                    .push(ScanIssue::new(dir, format!("failed to read entry: {}", e)));
                continue;
            }
        };

        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        let is_dir = match entry.file_type() {
            // Symlinks are never followed; a symlinked directory is treated
            // as an opaque file and classified as Other.
            Ok(ty) => ty.is_dir(),
            Err(e) => {
                listing
                    .issues
                    .push(ScanIssue::new(&path, format!("failed to get file type: {}", e)));
                continue;
            }
        };

        if is_dir {
            listing.dirs.push(DirChild { name, path });
        } else {
            let (size, modified_at) = match std::fs::metadata(&path) {
                Ok(meta) => (meta.len(), meta.modified().ok().map(DateTime::<Utc>::from)),
                Err(e) => {
                    tracing::debug!("stat failed for {}: {}", path.display(), e);
                    listing
                        .issues
                        .push(ScanIssue::new(&path, format!("failed to stat: {}", e)));
                    (0, None)
                }
            };

            listing.files.push(FileEntry {
                category: classify(&name),
                name,
                path: path.to_string_lossy().to_string(),
                size,
                modified_at,
            });
        }
    }

    listing
        .dirs
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    listing
        .files
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_lists_and_splits_children() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("audio")).unwrap();
        File::create(dir.path().join("notes.pdf")).unwrap();
        File::create(dir.path().join("lec1.mp3")).unwrap();

        let listing = list_children(dir.path()).unwrap();

        assert_eq!(listing.dirs.len(), 1);
        assert_eq!(listing.dirs[0].name, "audio");
        assert_eq!(listing.files.len(), 2);
        assert!(listing.issues.is_empty());
    }

    #[test]
    fn test_sorted_case_insensitively() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("beta.pdf")).unwrap();
        File::create(dir.path().join("Alpha.pdf")).unwrap();
        File::create(dir.path().join("gamma.pdf")).unwrap();
        fs::create_dir(dir.path().join("Zeta")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();

        let listing = list_children(dir.path()).unwrap();

        let file_names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(file_names, vec!["Alpha.pdf", "beta.pdf", "gamma.pdf"]);

        let dir_names: Vec<&str> = listing.dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(dir_names, vec!["alpha", "Zeta"]);
    }

    #[test]
    fn test_missing_directory_is_err() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("does-not-exist");

        let err = list_children(&gone).unwrap_err();
        assert_eq!(err.path, gone.to_string_lossy());
    }

    #[test]
    fn test_file_metadata_captured() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.pdf"), vec![0u8; 1234]).unwrap();

        let listing = list_children(dir.path()).unwrap();
        let entry = &listing.files[0];

        assert_eq!(entry.size, 1234);
        assert!(entry.modified_at.is_some());
        assert!(entry.category.is_document());
    }
}
