//! Tree construction
//!
//! Builds the hierarchical view bottom-up: each directory folds its own file
//! classifications with the aggregates of its retained children. A child is
//! retained iff its subtree holds at least one document or audio file;
//! pruning is decided here, by the parent, after the recursive call returns.

use std::path::Path;

use super::{basename, Scanner};
use crate::models::{set_id, TreeNode};
use crate::walker::{list_children, ScanIssue};

/// Build the node for `dir`, or `None` when the directory is unreadable or
/// the depth bound is exceeded. The returned node is never pruned here; the
/// caller applies the retention rule (scan roots keep empty nodes).
pub(super) fn scan_tree_dir(
    scanner: &Scanner,
    dir: &Path,
    depth: usize,
    relative_path: &str,
    issues: &mut Vec<ScanIssue>,
) -> Option<TreeNode> {
    // Depth truncation is silent, an unreadable directory is not
    if depth > scanner.tree_depth() || scanner.is_cancelled() {
        return None;
    }

    let listing = match list_children(dir) {
        Ok(listing) => listing,
        Err(issue) => {
            tracing::warn!("skipping unreadable directory {}: {}", issue.path, issue.detail);
            issues.push(issue);
            return None;
        }
    };
    issues.extend(listing.issues);

    let mut node = TreeNode {
        id: set_id(dir),
        name: basename(dir),
        path: dir.to_string_lossy().to_string(),
        relative_path: relative_path.to_string(),
        children: Vec::new(),
        docs: 0,
        audio: 0,
        size: 0,
        thumbnail_data: None,
    };

    for child in &listing.dirs {
        let child_rel = Path::new(relative_path)
            .join(&child.name)
            .to_string_lossy()
            .to_string();

        if let Some(child_node) = scan_tree_dir(scanner, &child.path, depth + 1, &child_rel, issues)
        {
            if child_node.docs > 0 || child_node.audio > 0 || !child_node.children.is_empty() {
                node.docs += child_node.docs;
                node.audio += child_node.audio;
                node.size += child_node.size;
                node.children.push(child_node);
            }
            // else: empty branch, dropped from this projection
        }
    }

    for file in &listing.files {
        if file.category.is_document() {
            node.docs += 1;
            node.size += file.size;
        } else if file.category.is_audio() {
            node.audio += 1;
            node.size += file.size;
        }
    }

    Some(node)
}
