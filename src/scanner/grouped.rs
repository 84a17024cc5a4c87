//! Grouped set listing
//!
//! Used when a set is opened for viewing: every document and audio file under
//! the set root goes into two flat lists, and each folder that directly holds
//! a qualifying file becomes one `FolderGroup`. Groups are emitted pre-order
//! (parent before its subfolders, folders name-sorted per level) so the
//! presentation can render them top-to-bottom like the tree view.

use std::path::Path;

use super::{basename, Scanner};
use crate::classify::{extension_of, FileCategory};
use crate::models::{FileEntry, FolderGroup, GroupedListing, SetFile};
use crate::walker::{list_children, ScanIssue};

pub(super) fn collect_grouped(
    scanner: &Scanner,
    dir: &Path,
    relative_path: &str,
    depth: usize,
    out: &mut GroupedListing,
    issues: &mut Vec<ScanIssue>,
) {
    if depth > scanner.tree_depth() || scanner.is_cancelled() {
        return;
    }

    let listing = match list_children(dir) {
        Ok(listing) => listing,
        Err(issue) => {
            tracing::warn!("skipping unreadable directory {}: {}", issue.path, issue.detail);
            issues.push(issue);
            return;
        }
    };
    issues.extend(listing.issues);

    // Files directly in the set root carry "/" as their folder marker
    let file_folder = if relative_path.is_empty() {
        "/".to_string()
    } else {
        relative_path.to_string()
    };

    let mut folder_docs = Vec::new();
    let mut folder_audio = Vec::new();

    for file in &listing.files {
        if file.category != FileCategory::Document && file.category != FileCategory::Audio {
            continue;
        }

        let rel_path = if relative_path.is_empty() {
            file.name.clone()
        } else {
            Path::new(relative_path)
                .join(&file.name)
                .to_string_lossy()
                .to_string()
        };

        let record = SetFile {
            name: file.name.clone(),
            path: file.path.clone(),
            relative_path: rel_path,
            folder: file_folder.clone(),
            file_type: extension_of(&file.name).unwrap_or_default(),
        };

        if file.category.is_document() {
            out.docs.push(record.clone());
            folder_docs.push(record);
        } else {
            out.audio.push(record.clone());
            folder_audio.push(record);
        }
    }

    if !folder_docs.is_empty() || !folder_audio.is_empty() {
        let folder = if relative_path.is_empty() {
            basename(dir)
        } else {
            relative_path.to_string()
        };

        out.structure.push(FolderGroup {
            folder,
            folder_path: dir.to_string_lossy().to_string(),
            docs: folder_docs,
            audio: folder_audio,
        });
    }

    for child in &listing.dirs {
        let child_rel = if relative_path.is_empty() {
            child.name.clone()
        } else {
            Path::new(relative_path)
                .join(&child.name)
                .to_string_lossy()
                .to_string()
        };
        collect_grouped(scanner, &child.path, &child_rel, depth + 1, out, issues);
    }
}

/// Collect every file of one category under `dir`, direct and recursive
pub(super) fn collect_files(
    scanner: &Scanner,
    dir: &Path,
    depth: usize,
    category: FileCategory,
    out: &mut Vec<FileEntry>,
    issues: &mut Vec<ScanIssue>,
) {
    if depth > scanner.tree_depth() || scanner.is_cancelled() {
        return;
    }

    let listing = match list_children(dir) {
        Ok(listing) => listing,
        Err(issue) => {
            tracing::warn!("skipping unreadable directory {}: {}", issue.path, issue.detail);
            issues.push(issue);
            return;
        }
    };
    issues.extend(listing.issues);

    for file in &listing.files {
        if file.category == category {
            out.push(file.clone());
        }
    }

    for child in &listing.dirs {
        collect_files(scanner, &child.path, depth + 1, category, out, issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use std::collections::BTreeSet;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn course() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("course");
        fs::create_dir(&root).unwrap();
        File::create(root.join("outline.pdf")).unwrap();
        File::create(root.join("cover.jpg")).unwrap(); // neither doc nor audio
        fs::create_dir(root.join("audio")).unwrap();
        File::create(root.join("audio/lec1.mp3")).unwrap();
        File::create(root.join("audio/lec2.mp3")).unwrap();
        fs::create_dir(root.join("extras")).unwrap(); // only subfolder content
        fs::create_dir(root.join("extras/week2")).unwrap();
        File::create(root.join("extras/week2/notes.docx")).unwrap();
        (dir, root)
    }

    fn grouped(root: &Path) -> GroupedListing {
        Scanner::new().list_grouped(root).value
    }

    #[test]
    fn test_global_lists_cover_all_depths() {
        let (_dir, root) = course();
        let listing = grouped(&root);

        let docs: BTreeSet<&str> = listing.docs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(docs, BTreeSet::from(["outline.pdf", "notes.docx"]));

        let audio: BTreeSet<&str> = listing.audio.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(audio, BTreeSet::from(["lec1.mp3", "lec2.mp3"]));
    }

    #[test]
    fn test_group_iff_direct_files() {
        let (_dir, root) = course();
        let listing = grouped(&root);

        let folders: Vec<String> = listing.structure.iter().map(|g| g.folder.clone()).collect();
        let week2 = Path::new("extras").join("week2").to_string_lossy().to_string();
        // "extras" holds only a subfolder, so it produces no group;
        // the root group comes first (pre-order), labeled by basename
        assert_eq!(folders, vec!["course".to_string(), "audio".to_string(), week2]);
    }

    #[test]
    fn test_root_files_use_root_marker() {
        let (_dir, root) = course();
        let listing = grouped(&root);

        let outline = listing.docs.iter().find(|f| f.name == "outline.pdf").unwrap();
        assert_eq!(outline.folder, "/");
        assert_eq!(outline.relative_path, "outline.pdf");
        assert_eq!(outline.file_type, "pdf");

        let lec1 = listing.audio.iter().find(|f| f.name == "lec1.mp3").unwrap();
        assert_eq!(lec1.folder, "audio");
        assert_eq!(
            lec1.relative_path,
            Path::new("audio").join("lec1.mp3").to_string_lossy()
        );
    }

    #[test]
    fn test_groups_carry_direct_files_only() {
        let (_dir, root) = course();
        let listing = grouped(&root);

        let root_group = &listing.structure[0];
        assert_eq!(root_group.docs.len(), 1);
        assert!(root_group.audio.is_empty());

        let audio_group = listing.structure.iter().find(|g| g.folder == "audio").unwrap();
        assert_eq!(audio_group.audio.len(), 2);
        assert!(audio_group.docs.is_empty());
    }

    #[test]
    fn test_list_documents_and_audio_recursive() {
        let (_dir, root) = course();
        let scanner = Scanner::new();

        let docs = scanner.list_documents(&root).value;
        let names: BTreeSet<&str> = docs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, BTreeSet::from(["outline.pdf", "notes.docx"]));
        assert!(docs.iter().all(|f| f.category.is_document()));

        let audio = scanner.list_audio(&root).value;
        assert_eq!(audio.len(), 2);
        assert!(audio.iter().all(|f| f.category.is_audio()));
    }

    #[test]
    fn test_grouped_matches_category_listings() {
        let (_dir, root) = course();
        let scanner = Scanner::new();

        let listing = scanner.list_grouped(&root).value;
        let doc_paths: BTreeSet<String> =
            listing.docs.iter().map(|f| f.path.clone()).collect();
        let listed: BTreeSet<String> = scanner
            .list_documents(&root)
            .value
            .iter()
            .map(|f| f.path.clone())
            .collect();
        assert_eq!(doc_paths, listed);
    }

    #[test]
    fn test_unreadable_root_yields_empty_listing() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("missing");

        let out = Scanner::new().list_grouped(&gone);
        assert!(out.value.docs.is_empty());
        assert!(out.value.structure.is_empty());
        assert_eq!(out.issues.len(), 1);
    }
}
