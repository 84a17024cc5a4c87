//! Output models
//!
//! Everything the indexer hands to the presentation layer. All models are
//! produced fresh per scan, serialized as camelCase JSON, and carry no
//! references back into the indexer.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::classify::FileCategory;

/// Derive a stable, one-way identifier for a set from its absolute path.
///
/// Same path always yields the same id; the id cannot be decoded back into
/// the path. 128 bits of SHA-256 keep collisions out of practical reach.
pub fn set_id(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

/// Immutable snapshot of one file at scan time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// File name (basename)
    pub name: String,
    /// Absolute path
    pub path: String,
    /// Extension-derived category
    pub category: FileCategory,
    /// Size in bytes
    pub size: u64,
    /// Last modification timestamp
    pub modified_at: Option<DateTime<Utc>>,
}

/// Category label of a set in the flat view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetKind {
    #[serde(rename = "Doc Only")]
    DocOnly,
    #[serde(rename = "Doc + Audio")]
    DocAudio,
}

impl SetKind {
    pub fn from_counts(audio: u64) -> Self {
        if audio > 0 {
            SetKind::DocAudio
        } else {
            SetKind::DocOnly
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SetKind::DocOnly => "Doc Only",
            SetKind::DocAudio => "Doc + Audio",
        }
    }
}

/// One learning set in the flat view.
///
/// Emitted for a directory iff that directory directly contains at least one
/// document file; audio-only directories never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    /// One-way path digest, see [`set_id`]
    pub id: String,
    /// Absolute path of the set directory
    pub path: String,
    /// Display name (basename)
    pub name: String,
    /// Direct document count
    pub docs: u64,
    /// Direct audio count
    pub audio: u64,
    /// "Doc Only" or "Doc + Audio"
    #[serde(rename = "type")]
    pub kind: SetKind,
    /// Total byte size of all direct files
    pub size: u64,
    /// First direct PDF, used as a thumbnail candidate
    pub thumbnail: Option<String>,
    /// Excerpt (≤200 chars) from a readme/intro file, empty when absent
    pub description: String,
    /// Directory creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Max of the directory's own mtime and its direct files' mtimes
    pub updated_at: Option<DateTime<Utc>>,
}

/// A self-describing thumbnail payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// `image/png` for PNG files, `image/jpeg` for every other image type
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl Thumbnail {
    pub fn new(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Render as a `data:` URL for direct embedding in an `<img>` tag
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// One node of the hierarchical view.
///
/// Counts and size aggregate over the entire retained subtree. A node is
/// retained as a child iff its aggregated doc+audio count is nonzero or it
/// has at least one retained child; scan roots are never pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// One-way path digest, see [`set_id`]
    pub id: String,
    /// Display name (basename)
    pub name: String,
    /// Absolute path
    pub path: String,
    /// Path relative to the scan root (root's own is its basename)
    pub relative_path: String,
    /// Retained children, folders-first then case-insensitive name order
    pub children: Vec<TreeNode>,
    /// Aggregated document count over the subtree
    pub docs: u64,
    /// Aggregated audio count over the subtree
    pub audio: u64,
    /// Aggregated byte size of document and audio files over the subtree
    pub size: u64,
    /// Populated lazily via the thumbnail resolver, never during the scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_data: Option<Thumbnail>,
}

impl TreeNode {
    /// True when nothing under this node (itself included) holds documents
    /// or audio. Such nodes are pruned everywhere except at scan roots.
    pub fn is_empty(&self) -> bool {
        self.docs == 0 && self.audio == 0 && self.children.is_empty()
    }
}

/// File record in the grouped view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFile {
    /// File name (basename)
    pub name: String,
    /// Absolute path
    pub path: String,
    /// Path relative to the scanned set root
    pub relative_path: String,
    /// Relative path of the containing folder, `/` for the root itself
    pub folder: String,
    /// Extension token without the dot, e.g. `pdf`, `mp3`
    #[serde(rename = "type")]
    pub file_type: String,
}

/// Files directly inside one folder of a set.
///
/// A group exists iff the folder directly contains at least one document or
/// audio file; folders holding only subfolders produce no group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderGroup {
    /// Relative path label (set root uses its basename)
    pub folder: String,
    /// Absolute folder path
    pub folder_path: String,
    /// Documents directly in this folder
    pub docs: Vec<SetFile>,
    /// Audio directly in this folder
    pub audio: Vec<SetFile>,
}

/// Everything inside one set, flattened and grouped at once
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedListing {
    /// All documents under the root, any depth
    pub docs: Vec<SetFile>,
    /// All audio under the root, any depth
    pub audio: Vec<SetFile>,
    /// One group per folder that directly holds documents or audio,
    /// in traversal order (folders-first, name-sorted per level)
    pub structure: Vec<FolderGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_set_id_stable_and_distinct() {
        let a = PathBuf::from("/lib/Course-A");
        let b = PathBuf::from("/lib/Course-B");

        assert_eq!(set_id(&a), set_id(&a));
        assert_ne!(set_id(&a), set_id(&b));
        assert_eq!(set_id(&a).len(), 32);
        // One-way: the raw path must not survive into the id
        assert!(!set_id(&a).contains("Course"));
    }

    #[test]
    fn test_set_kind_label() {
        assert_eq!(SetKind::from_counts(0), SetKind::DocOnly);
        assert_eq!(SetKind::from_counts(3), SetKind::DocAudio);

        let json = serde_json::to_string(&SetKind::DocAudio).unwrap();
        assert_eq!(json, "\"Doc + Audio\"");
        let json = serde_json::to_string(&SetKind::DocOnly).unwrap();
        assert_eq!(json, "\"Doc Only\"");
    }

    #[test]
    fn test_thumbnail_data_url() {
        let thumb = Thumbnail::new("image/png", b"\x89PNG");
        assert!(thumb.data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = SetSummary {
            id: "abc".into(),
            path: "/lib/Course-A".into(),
            name: "Course-A".into(),
            docs: 1,
            audio: 0,
            kind: SetKind::DocOnly,
            size: 42,
            thumbnail: None,
            description: String::new(),
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "Doc Only");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
