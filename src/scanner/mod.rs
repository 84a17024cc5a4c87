//! Library scanner
//!
//! Entry points for every projection of the filesystem state: the flat set
//! list, the pruned tree, and the grouped per-set listing. One `Scanner`
//! value carries the traversal configuration; every call produces a fresh
//! snapshot and retains no state.
//!
//! Nothing here returns a hard error for filesystem-level problems. Each
//! operation yields its best-effort result plus the list of issues that were
//! absorbed along the way.

mod flat;
mod grouped;
mod tree;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::classify::FileCategory;
use crate::models::{FileEntry, GroupedListing, SetSummary, Thumbnail, TreeNode};
use crate::thumbnails;
use crate::walker::ScanIssue;

/// Default maximum recursion depth for the tree view
pub const DEFAULT_TREE_DEPTH: usize = 10;

/// Default maximum recursion depth for the flat set extractor
pub const DEFAULT_FLAT_DEPTH: usize = 5;

/// Default description excerpt budget, in characters
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// Cooperative cancellation signal, checked between directory visits.
///
/// A cancelled scan stops descending and returns whatever it has
/// accumulated so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Best-effort result of one scan operation.
///
/// `issues` lists every recovered problem (unreadable directories, failed
/// stats); the value is always present, possibly partial.
#[derive(Debug, Default)]
pub struct ScanOutput<T> {
    pub value: T,
    pub issues: Vec<ScanIssue>,
}

/// Configuration for library scans
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    /// Maximum depth for the tree view and grouped listing
    tree_depth: Option<usize>,
    /// Maximum depth for the flat set extractor
    flat_depth: Option<usize>,
    /// Description excerpt budget in characters
    excerpt_chars: Option<usize>,
    /// Optional cancellation signal
    cancel: Option<CancelToken>,
}

impl Scanner {
    /// Create a scanner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum tree/grouped recursion depth
    pub fn with_tree_depth(mut self, depth: usize) -> Self {
        self.tree_depth = Some(depth);
        self
    }

    /// Set maximum flat-extraction recursion depth
    pub fn with_flat_depth(mut self, depth: usize) -> Self {
        self.flat_depth = Some(depth);
        self
    }

    /// Set the description excerpt budget
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = Some(chars);
        self
    }

    /// Attach a cancellation token
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn tree_depth(&self) -> usize {
        self.tree_depth.unwrap_or(DEFAULT_TREE_DEPTH)
    }

    pub(crate) fn flat_depth(&self) -> usize {
        self.flat_depth.unwrap_or(DEFAULT_FLAT_DEPTH)
    }

    pub(crate) fn excerpt_chars(&self) -> usize {
        self.excerpt_chars.unwrap_or(DEFAULT_EXCERPT_CHARS)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(|t| t.is_cancelled()).unwrap_or(false)
    }

    /// Scan roots and return the flat list of learning sets.
    ///
    /// One `SetSummary` per directory that directly contains at least one
    /// document, in depth-first order per root. Nonexistent roots are
    /// skipped silently.
    pub fn scan_flat(&self, roots: &[PathBuf]) -> ScanOutput<Vec<SetSummary>> {
        let start = Instant::now();
        let (per_root, issues) = self.scan_roots(roots, |root| {
            let mut sets = Vec::new();
            let mut issues = Vec::new();
            if root.exists() {
                flat::scan_set_dir(self, root, 0, &mut sets, &mut issues);
            }
            (sets, issues)
        });

        let sets: Vec<SetSummary> = per_root.into_iter().flatten().collect();
        tracing::info!(
            "flat scan: {} sets across {} roots in {}ms",
            sets.len(),
            roots.len(),
            start.elapsed().as_millis()
        );

        ScanOutput { value: sets, issues }
    }

    /// Scan roots and return one pruned tree per readable root.
    ///
    /// Root nodes survive even when empty; empty branches below them are
    /// pruned. Output order matches the input root order regardless of
    /// which worker finishes first.
    pub fn scan_tree(&self, roots: &[PathBuf]) -> ScanOutput<Vec<TreeNode>> {
        let start = Instant::now();
        let (per_root, issues) = self.scan_roots(roots, |root| {
            let mut issues = Vec::new();
            if !root.exists() {
                return (None, issues);
            }
            let name = basename(root);
            let node = tree::scan_tree_dir(self, root, 0, &name, &mut issues);
            (node, issues)
        });

        let trees: Vec<TreeNode> = per_root.into_iter().flatten().collect();
        tracing::info!(
            "tree scan: {} trees across {} roots in {}ms",
            trees.len(),
            roots.len(),
            start.elapsed().as_millis()
        );

        ScanOutput { value: trees, issues }
    }

    /// List everything inside one set: all documents, all audio, and one
    /// group per folder that directly holds either.
    pub fn list_grouped(&self, set_path: &Path) -> ScanOutput<GroupedListing> {
        let mut listing = GroupedListing::default();
        let mut issues = Vec::new();
        grouped::collect_grouped(self, set_path, "", 0, &mut listing, &mut issues);
        ScanOutput { value: listing, issues }
    }

    /// All document files under a set, direct and recursive
    pub fn list_documents(&self, set_path: &Path) -> ScanOutput<Vec<FileEntry>> {
        self.list_category(set_path, FileCategory::Document)
    }

    /// All audio files under a set, direct and recursive
    pub fn list_audio(&self, set_path: &Path) -> ScanOutput<Vec<FileEntry>> {
        self.list_category(set_path, FileCategory::Audio)
    }

    fn list_category(&self, set_path: &Path, category: FileCategory) -> ScanOutput<Vec<FileEntry>> {
        let mut files = Vec::new();
        let mut issues = Vec::new();
        grouped::collect_files(self, set_path, 0, category, &mut files, &mut issues);
        ScanOutput { value: files, issues }
    }

    /// Find a cover image for a set, non-recursively.
    ///
    /// Returns `None` when the directory holds no image or cannot be read.
    pub fn resolve_thumbnail(&self, set_path: &Path) -> Option<Thumbnail> {
        thumbnails::resolve_thumbnail(set_path)
    }

    /// Run `scan_one` over every root, fanning out one worker per root when
    /// more than one is given. Results and issues are joined in input-root
    /// order; root scans share no mutable state.
    fn scan_roots<T, F>(&self, roots: &[PathBuf], scan_one: F) -> (Vec<T>, Vec<ScanIssue>)
    where
        T: Send + Default,
        F: Fn(&Path) -> (T, Vec<ScanIssue>) + Sync,
    {
        let mut values = Vec::with_capacity(roots.len());
        let mut issues = Vec::new();

        if roots.len() <= 1 {
            for root in roots {
                let (value, root_issues) = scan_one(root);
                values.push(value);
                issues.extend(root_issues);
            }
        } else {
            std::thread::scope(|scope| {
                let scan_one = &scan_one;
                let handles: Vec<_> = roots
                    .iter()
                    .map(|root| scope.spawn(move || scan_one(root)))
                    .collect();

                for (handle, root) in handles.into_iter().zip(roots) {
                    match handle.join() {
                        Ok((value, root_issues)) => {
                            values.push(value);
                            issues.extend(root_issues);
                        }
                        Err(_) => {
                            values.push(T::default());
                            issues.push(ScanIssue::new(root, "scan worker panicked"));
                        }
                    }
                }
            });
        }

        (values, issues)
    }
}

/// Basename of a path, falling back to the full path for roots like `/`
pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
