//! Thumbnail resolution
//!
//! Finds a cover image for a set by name heuristics over the set root's
//! direct files only (never recursive). Cover-like names win over arbitrary
//! images; the first image in listing order is the fallback. The payload is
//! returned base64-encoded with a MIME type derived from the extension:
//! `png` maps to `image/png`, every other recognized image extension to
//! `image/jpeg` (a deliberate simplification, not content sniffing).

use std::path::Path;

use crate::classify::{extension_of, IMAGE_EXTENSIONS};
use crate::models::Thumbnail;

/// Cover-name stems, in priority order
const COVER_STEMS: &[&str] = &["cover", "thumbnail", "thumb", "poster", "image"];

/// Resolve a thumbnail for the set at `dir`.
///
/// Pass 1 walks the cover stems (stem outer, image extension inner, then
/// listing order) looking for a file named exactly `stem.ext` or starting
/// with the stem; the match must itself carry an image extension. Pass 2
/// falls back to the first image in listing order. Returns `None` when
/// neither pass matches or the directory cannot be read.
pub fn resolve_thumbnail(dir: &Path) -> Option<Thumbnail> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            tracing::warn!("cannot read {} for thumbnail: {}", dir.display(), e);
            return None;
        }
    };

    let mut names: Vec<String> = read_dir
        .flatten()
        .filter(|entry| entry.file_type().map(|ty| !ty.is_dir()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

    // Pass 1: cover-like names
    for stem in COVER_STEMS {
        for ext in IMAGE_EXTENSIONS {
            for name in &names {
                let lower = name.to_lowercase();
                if lower == format!("{}.{}", stem, ext) || lower.starts_with(stem) {
                    if let Some(thumb) = load_image(&dir.join(name)) {
                        return Some(thumb);
                    }
                }
            }
        }
    }

    // Pass 2: first image of any name
    for name in &names {
        if let Some(thumb) = load_image(&dir.join(name)) {
            return Some(thumb);
        }
    }

    None
}

/// Load one candidate file as a thumbnail.
///
/// Returns `None` when the file is not an image by extension or cannot be
/// read; an unreadable candidate just drops out of the search.
fn load_image(path: &Path) -> Option<Thumbnail> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let ext = extension_of(&name)?;
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("failed to read thumbnail {}: {}", path.display(), e);
            return None;
        }
    };

    let mime = if ext == "png" { "image/png" } else { "image/jpeg" };
    Some(Thumbnail::new(mime, &bytes))
}
