//! Image collection.
//!
//! Stage 1 of the manifest pipeline. Walks the source folder (optionally
//! descending into subfolders) and returns every PNG/WEBP file in a stable
//! order.
//!
//! ## Ordering
//!
//! Results are sorted by the lower-cased full path string. Native directory
//! iteration order differs between platforms and filesystems; sorting this
//! way makes the manifest byte-for-byte reproducible and ignores case, so
//! `B.png` lands between `a.png` and `c.png` everywhere.
//!
//! ## Errors
//!
//! An empty result is not an error. A missing or unreadable source folder is,
//! and so is any entry the walk cannot read: the run aborts rather than
//! writing a manifest that silently omits part of the tree.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions (lower-case, without dot) that are collected.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "webp"];

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Source directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Cannot read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Collect image files under `root`.
///
/// With `recursive == false` only direct children of `root` are considered.
pub fn collect_images(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, CollectError> {
    if !root.exists() {
        return Err(CollectError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CollectError::NotADirectory(root.to_path_buf()));
    }

    let mut walker = WalkDir::new(root).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut images = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| CollectError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if is_image(path) {
            log::trace!("Found image {}", path.display());
            images.push(path.to_path_buf());
        }
    }

    images.sort_by_cached_key(|p| p.to_string_lossy().to_lowercase());
    log::debug!(
        "Collected {} image(s) from {} (recursive: {})",
        images.len(),
        root.display(),
        recursive
    );
    Ok(images)
}

/// A regular file (links followed) with a collected extension, any case.
pub fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
