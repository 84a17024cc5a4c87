//! # studyshelf
//!
//! Filesystem indexer for learning-set libraries. Walks configured root
//! directories and projects the same filesystem state three ways:
//!
//! - a flat list of sets ([`scan_flat`]): one entry per directory that
//!   directly contains documents;
//! - a pruned tree ([`scan_tree`]): the full hierarchy with empty branches
//!   removed and counts aggregated bottom-up;
//! - a grouped listing ([`list_grouped`]): all documents and audio under
//!   one set, plus per-folder groups, used when a set is opened.
//!
//! Every scan is a point-in-time snapshot: nothing is cached between calls
//! and external mutation during a scan is tolerated, not detected.
//! Filesystem-level problems never fail a scan; they are absorbed into a
//! diagnostics list ([`ScanOutput::issues`]) and logged.
//!
//! The convenience functions below run a default [`Scanner`] and log the
//! accumulated issues through `tracing`. Use [`Scanner`] directly to set
//! depth bounds, attach a [`CancelToken`], or inspect issues yourself.

pub mod classify;
pub mod models;
pub mod scanner;
pub mod settings;
pub mod thumbnails;
pub mod walker;

use std::path::{Path, PathBuf};

pub use classify::{classify, FileCategory, AUDIO_EXTENSIONS, DOC_EXTENSIONS, IMAGE_EXTENSIONS};
pub use models::{
    set_id, FileEntry, FolderGroup, GroupedListing, SetFile, SetKind, SetSummary, Thumbnail,
    TreeNode,
};
pub use scanner::{CancelToken, ScanOutput, Scanner};
pub use settings::{Settings, SettingsError};
pub use walker::ScanIssue;

fn log_issues<T>(output: ScanOutput<T>) -> T {
    for issue in &output.issues {
        tracing::warn!(path = %issue.path, "scan issue: {}", issue.detail);
    }
    output.value
}

/// Flat list of learning sets under the given roots
pub fn scan_flat(roots: &[PathBuf]) -> Vec<SetSummary> {
    log_issues(Scanner::new().scan_flat(roots))
}

/// Flat list of learning sets under the roots from the settings store
pub fn scan_flat_default() -> Vec<SetSummary> {
    scan_flat(&Settings::load_or_default().scan_roots())
}

/// One pruned tree per readable root, in input order
pub fn scan_tree(roots: &[PathBuf]) -> Vec<TreeNode> {
    log_issues(Scanner::new().scan_tree(roots))
}

/// Trees for the roots from the settings store
pub fn scan_tree_default() -> Vec<TreeNode> {
    scan_tree(&Settings::load_or_default().scan_roots())
}

/// Everything inside one set, flattened and grouped by folder
pub fn list_grouped(set_path: &Path) -> GroupedListing {
    log_issues(Scanner::new().list_grouped(set_path))
}

/// All documents under a set, direct and recursive
pub fn list_documents(set_path: &Path) -> Vec<FileEntry> {
    log_issues(Scanner::new().list_documents(set_path))
}

/// All audio tracks under a set, direct and recursive
pub fn list_audio(set_path: &Path) -> Vec<FileEntry> {
    log_issues(Scanner::new().list_audio(set_path))
}

/// Cover image for a set, if any (non-recursive, name heuristics)
pub fn resolve_thumbnail(set_path: &Path) -> Option<Thumbnail> {
    thumbnails::resolve_thumbnail(set_path)
}
