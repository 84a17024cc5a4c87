//! Flat set extraction
//!
//! Depth-first walk that emits one `SetSummary` per directory directly
//! containing at least one document. Every subdirectory is entered
//! unconditionally (up to the flat depth bound). Qualification and the
//! document count look only at a directory's own files, so a parent and its
//! child can both be sets; audio count, byte size, and recency aggregate
//! over the whole subtree.

use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;

use super::{basename, Scanner};
use crate::classify::extension_of;
use crate::models::{set_id, SetKind, SetSummary};
use crate::walker::{list_children, ScanIssue};

/// Subtree aggregates folded into a qualifying ancestor's summary
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct SubtreeTotals {
    audio: u64,
    size: u64,
    /// Max mtime over the subtree's files (directory mtimes excluded)
    last_modified: Option<DateTime<Utc>>,
}

impl SubtreeTotals {
    fn touch(&mut self, mtime: Option<DateTime<Utc>>) {
        if let Some(mtime) = mtime {
            self.last_modified =
                Some(self.last_modified.map_or(mtime, |current| current.max(mtime)));
        }
    }
}

pub(super) fn scan_set_dir(
    scanner: &Scanner,
    dir: &Path,
    depth: usize,
    out: &mut Vec<SetSummary>,
    issues: &mut Vec<ScanIssue>,
) -> SubtreeTotals {
    if depth > scanner.flat_depth() || scanner.is_cancelled() {
        return SubtreeTotals::default();
    }

    let listing = match list_children(dir) {
        Ok(listing) => listing,
        Err(issue) => {
            tracing::warn!("skipping unreadable directory {}: {}", issue.path, issue.detail);
            issues.push(issue);
            return SubtreeTotals::default();
        }
    };
    issues.extend(listing.issues);

    let mut totals = SubtreeTotals::default();

    // Children first: sets are emitted bottom-up within a root, and their
    // aggregates fold upward into every qualifying ancestor
    for child in &listing.dirs {
        let sub = scan_set_dir(scanner, &child.path, depth + 1, out, issues);
        totals.audio += sub.audio;
        totals.size += sub.size;
        totals.touch(sub.last_modified);
    }

    let (created_at, dir_mtime) = match std::fs::metadata(dir) {
        Ok(meta) => (
            meta.created().ok().map(DateTime::<Utc>::from),
            meta.modified().ok().map(DateTime::<Utc>::from),
        ),
        Err(e) => {
            issues.push(ScanIssue::new(dir, format!("failed to stat: {}", e)));
            (None, None)
        }
    };

    let mut docs: u64 = 0;
    let mut thumbnail: Option<String> = None;
    let mut description = String::new();

    for file in &listing.files {
        if file.category.is_document() {
            docs += 1;
            if thumbnail.is_none() && extension_of(&file.name).as_deref() == Some("pdf") {
                thumbnail = Some(file.path.clone());
            }
        } else if file.category.is_audio() {
            totals.audio += 1;
        }

        // Size and recency cover every file, not just docs/audio
        totals.size += file.size;
        totals.touch(file.modified_at);

        let lower = file.name.to_lowercase();
        if lower.starts_with("readme") || lower.starts_with("intro") {
            match read_excerpt(Path::new(&file.path), scanner.excerpt_chars()) {
                Ok(text) => description = text,
                Err(issue) => issues.push(issue),
            }
        }
    }

    if docs > 0 {
        // updatedAt is the max of the directory's own mtime and every
        // contained file's mtime, any depth
        let mut updated_at = dir_mtime;
        if let Some(last) = totals.last_modified {
            updated_at = Some(updated_at.map_or(last, |current| current.max(last)));
        }

        out.push(SetSummary {
            id: set_id(dir),
            path: dir.to_string_lossy().to_string(),
            name: basename(dir),
            docs,
            audio: totals.audio,
            kind: SetKind::from_counts(totals.audio),
            size: totals.size,
            thumbnail,
            description,
            created_at,
            updated_at,
        });
    }

    totals
}

/// Read the first `max_chars` characters of a description file.
///
/// Reads at most four bytes per character so a multi-gigabyte "readme" can
/// never stall a scan; invalid UTF-8 is replaced rather than rejected.
fn read_excerpt(path: &Path, max_chars: usize) -> Result<String, ScanIssue> {
    let file = std::fs::File::open(path)
        .map_err(|e| ScanIssue::new(path, format!("failed to open description: {}", e)))?;

    let mut buffer = Vec::new();
    file.take((max_chars * 4) as u64)
        .read_to_end(&mut buffer)
        .map_err(|e| ScanIssue::new(path, format!("failed to read description: {}", e)))?;

    let text = String::from_utf8_lossy(&buffer);
    Ok(text.chars().take(max_chars).collect::<String>().trim().to_string())
}
