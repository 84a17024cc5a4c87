//! File classification
//!
//! Maps file names to coarse categories (document / audio / image / other)
//! by lower-cased extension. Pure lookup, no filesystem access.

use serde::{Deserialize, Serialize};

/// Document extensions that qualify a folder as a learning set
pub const DOC_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Audio track extensions
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "wma", "ogg", "flac"];

/// Image extensions considered for thumbnails
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Category of a file derived from its extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// PDF or Word document
    Document,
    /// Audio track
    Audio,
    /// Image (thumbnail candidate)
    Image,
    /// Anything else
    #[default]
    Other,
}

impl FileCategory {
    pub fn is_document(self) -> bool {
        self == FileCategory::Document
    }

    pub fn is_audio(self) -> bool {
        self == FileCategory::Audio
    }

    pub fn is_image(self) -> bool {
        self == FileCategory::Image
    }
}

/// Extract the lower-cased extension of a file name, without the dot.
///
/// Returns `None` for names without an extension (including dotfiles
/// like `.gitignore`).
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Classify a file name into a category.
///
/// Total function: unknown and missing extensions map to `Other`.
pub fn classify(file_name: &str) -> FileCategory {
    let ext = match extension_of(file_name) {
        Some(ext) => ext,
        None => return FileCategory::Other,
    };

    if DOC_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Document
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Audio
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Image
    } else {
        FileCategory::Other
    }
}
